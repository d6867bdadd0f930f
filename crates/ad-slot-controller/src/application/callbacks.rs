//! Renderer callback adapter
//!
//! Handed to the renderer with every load command. Each handle is bound to
//! the cycle that issued it; once the slot moves on to a new cycle (or is
//! dropped) every call on the handle is discarded.

use super::controller::SlotShared;
use crate::domain::{AdInteraction, CycleToken};
use crate::metrics;
use shared_types::{AdLoadError, AdMetadata};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Callback handle for one load cycle of one slot.
///
/// Cheap to clone; holds only a weak reference, so an outstanding renderer
/// request never keeps a slot alive.
#[derive(Clone)]
pub struct RendererCallbacks {
    slot: Weak<SlotShared>,
    cycle: CycleToken,
}

impl RendererCallbacks {
    pub(crate) fn new(slot: Weak<SlotShared>, cycle: CycleToken) -> Self {
        Self { slot, cycle }
    }

    /// Cycle this handle belongs to.
    #[must_use]
    pub fn cycle(&self) -> CycleToken {
        self.cycle
    }

    /// Whether the originating slot still exists.
    ///
    /// A live slot may still reject the handle if its cycle has moved on.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.slot.strong_count() > 0
    }

    /// Creative metadata arrived.
    pub fn on_loaded(&self, metadata: AdMetadata) {
        if let Some(slot) = self.upgrade() {
            slot.settle(self.cycle, Ok(metadata));
        }
    }

    /// The renderer gave up on this request.
    pub fn on_failed(&self, error: AdLoadError) {
        if let Some(slot) = self.upgrade() {
            slot.settle(self.cycle, Err(error));
        }
    }

    /// The network served the ad to the native view.
    pub fn on_ad_served(&self) {
        self.forward(AdInteraction::AdServed);
    }

    /// An impression was recorded.
    pub fn on_impression(&self) {
        self.forward(AdInteraction::Impression);
    }

    /// The user clicked the ad.
    pub fn on_clicked(&self) {
        self.forward(AdInteraction::Clicked);
    }

    /// The ad sent the user out of the application.
    pub fn on_left_application(&self) {
        self.forward(AdInteraction::LeftApplication);
    }

    fn forward(&self, interaction: AdInteraction) {
        if let Some(slot) = self.upgrade() {
            slot.interaction(self.cycle, interaction);
        }
    }

    fn upgrade(&self) -> Option<Arc<SlotShared>> {
        let slot = self.slot.upgrade();
        if slot.is_none() {
            debug!(cycle = %self.cycle, "Callback for dropped slot discarded");
            metrics::record_stale_callback();
        }
        slot
    }
}

impl fmt::Debug for RendererCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererCallbacks")
            .field("cycle", &self.cycle)
            .field("attached", &self.is_attached())
            .finish()
    }
}
