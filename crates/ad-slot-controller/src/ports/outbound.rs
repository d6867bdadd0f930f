//! # Outbound Ports
//!
//! Traits for external collaborators (native renderer, ad-unit lookup,
//! log sink), plus test doubles.

use crate::application::RendererCallbacks;
use crate::domain::CycleToken;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{AdLoadError, AdMetadata, CreativeKind, SlotIndex};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Parameters of one load command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdRequest {
    /// Slot issuing the request.
    pub slot: SlotIndex,
    /// Creative kind requested.
    pub kind: CreativeKind,
    /// Opaque ad-unit identifier for `kind`.
    pub unit_id: String,
    /// Fixed refresh interval handed to the native view.
    pub refresh_interval: Duration,
    /// Cycle the request belongs to.
    pub cycle: CycleToken,
}

/// Native ad renderer - outbound port.
///
/// Exclusively owned by one slot. `load` is fire-and-forget: it must return
/// immediately and report the outcome later through `callbacks`.
pub trait AdRenderer: Send {
    /// Request a creative.
    fn load(&mut self, request: AdRequest, callbacks: RendererCallbacks);

    /// Drop every callback registration of the current cycle.
    fn release(&mut self) {}
}

/// Ad-unit identifier lookup - outbound port.
pub trait UnitIdSource: Send + Sync {
    /// Identifier for a creative kind, if one is configured.
    fn unit_id(&self, kind: CreativeKind) -> Option<&str>;
}

/// Log event names forwarded to the logger collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdLogEvent {
    /// Renderer reported a failure.
    Failed,
    /// Network served the ad to the native view.
    Loaded,
    /// Creative metadata received; slot is loaded.
    Received,
    /// User clicked the ad.
    Click,
    /// Impression recorded.
    Impression,
    /// Ad left the application.
    Left,
    /// Slot is on screen.
    InView,
    /// Other ads are on screen, this one is not.
    NotInView,
}

impl AdLogEvent {
    /// Wire name of the event.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Failed => "FAILED",
            Self::Loaded => "LOADED",
            Self::Received => "RECEIVED",
            Self::Click => "CLICK",
            Self::Impression => "IMPRESSION",
            Self::Left => "LEFT",
            Self::InView => "IN VIEW",
            Self::NotInView => "NOT IN VIEW",
        }
    }
}

impl fmt::Display for AdLogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log sink - outbound port.
///
/// Fire-and-forget: implementations must not block and cannot fail.
pub trait AdEventLogger: Send + Sync {
    /// Record one event.
    fn log(
        &self,
        category: &str,
        event: AdLogEvent,
        message: &str,
        detail: Option<&serde_json::Value>,
    );
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

#[derive(Default)]
struct MockRendererState {
    requests: Vec<AdRequest>,
    callbacks: Vec<RendererCallbacks>,
    releases: usize,
    immediate: Option<Result<AdMetadata, AdLoadError>>,
}

/// Mock renderer for testing.
///
/// Clones share state, so a test keeps one clone and hands the other to the
/// slot. Outcomes are delivered explicitly with `complete`/`fail`, or
/// synchronously from inside `load` when `respond_immediately` is set.
#[derive(Clone, Default)]
pub struct MockRenderer {
    inner: Arc<Mutex<MockRendererState>>,
}

impl MockRenderer {
    /// Create a renderer that never answers on its own.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every load synchronously with `outcome`.
    #[must_use]
    pub fn respond_immediately(self, outcome: Result<AdMetadata, AdLoadError>) -> Self {
        self.inner.lock().immediate = Some(outcome);
        self
    }

    /// Number of load commands received.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.inner.lock().requests.len()
    }

    /// Number of `release` calls received.
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.inner.lock().releases
    }

    /// All requests received, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<AdRequest> {
        self.inner.lock().requests.clone()
    }

    /// Callbacks handed over with the n-th load (0-based).
    #[must_use]
    pub fn callbacks(&self, n: usize) -> Option<RendererCallbacks> {
        self.inner.lock().callbacks.get(n).cloned()
    }

    /// Callbacks of the most recent load.
    #[must_use]
    pub fn last_callbacks(&self) -> Option<RendererCallbacks> {
        self.inner.lock().callbacks.last().cloned()
    }

    /// Deliver a success for the most recent load. Returns whether a load existed.
    pub fn complete(&self, metadata: AdMetadata) -> bool {
        match self.last_callbacks() {
            Some(callbacks) => {
                callbacks.on_loaded(metadata);
                true
            }
            None => false,
        }
    }

    /// Deliver a failure for the most recent load. Returns whether a load existed.
    pub fn fail(&self, error: AdLoadError) -> bool {
        match self.last_callbacks() {
            Some(callbacks) => {
                callbacks.on_failed(error);
                true
            }
            None => false,
        }
    }
}

impl AdRenderer for MockRenderer {
    fn load(&mut self, request: AdRequest, callbacks: RendererCallbacks) {
        let immediate = {
            let mut state = self.inner.lock();
            state.requests.push(request);
            state.callbacks.push(callbacks.clone());
            state.immediate.clone()
        };

        match immediate {
            Some(Ok(metadata)) => callbacks.on_loaded(metadata),
            Some(Err(error)) => callbacks.on_failed(error),
            None => {}
        }
    }

    fn release(&mut self) {
        self.inner.lock().releases += 1;
    }
}

/// One entry captured by [`RecordingLogger`].
#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    /// Log category.
    pub category: String,
    /// Event name.
    pub event: AdLogEvent,
    /// Message text.
    pub message: String,
    /// Structured detail.
    pub detail: Option<serde_json::Value>,
}

/// Logger that keeps every entry in memory.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl RecordingLogger {
    /// Create an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything logged so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Number of entries with a given event name.
    #[must_use]
    pub fn count(&self, event: AdLogEvent) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|record| record.event == event)
            .count()
    }

    /// Entries with a given event name.
    #[must_use]
    pub fn find(&self, event: AdLogEvent) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.event == event)
            .cloned()
            .collect()
    }
}

impl AdEventLogger for RecordingLogger {
    fn log(
        &self,
        category: &str,
        event: AdLogEvent,
        message: &str,
        detail: Option<&serde_json::Value>,
    ) {
        self.records.lock().push(LogRecord {
            category: category.to_string(),
            event,
            message: message.to_string(),
            detail: detail.cloned(),
        });
    }
}
