//! # Ad Slot Controller
//!
//! Viewability-triggered load controller for one native ad slot inside a
//! scrolling list.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Defer requesting an ad creative until its slot is actually on screen:
//! - One load command per cycle, however many visibility events arrive
//! - Renderer outcomes from superseded cycles are discarded
//! - The creative's aspect ratio is published only once it has loaded
//!
//! ## Slot Lifecycle
//!
//! | Status | Meaning | Leaves on |
//! |--------|---------|-----------|
//! | `Idle` | Nothing requested in this cycle | mount (load on mount), visible |
//! | `Loading` | Load command outstanding | renderer success / failure |
//! | `Loaded` | Creative shown, aspect ratio known | reset |
//! | `Failed` | Renderer gave up | reset, retry |
//!
//! ## Module Structure
//!
//! ```text
//! ad-slot-controller/
//! ├── domain/          # SlotStatus state machine, visibility filter, value objects
//! ├── ports/           # AdSlotApi (inbound) + renderer, unit ids, logger (outbound)
//! ├── application/     # AdSlotController and RendererCallbacks
//! ├── adapters/        # TracingAdLogger
//! ├── metrics.rs       # Prometheus counters (feature "metrics")
//! └── config.rs        # AdSlotConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;

// Re-exports
pub use adapters::TracingAdLogger;
pub use application::{AdSlotController, InteractionListener, RendererCallbacks, SlotContext};
pub use config::{AdSlotConfig, AdUnitIds, TEST_IMAGE_UNIT_ID, TEST_VIDEO_UNIT_ID};
pub use domain::{
    ads_in_view, is_ad_key, is_slot_visible,
    AdInteraction, AdSlotError, AdSlotResult, AspectRatio, CycleToken,
    Effect, SlotEvent, SlotSnapshot, SlotSpec, SlotStatus, Transition,
    DEFAULT_AD_KEY_MARKER, DEFAULT_ASPECT_RATIO,
    invariant_aspect_ratio, invariant_monotonic_cycle, invariant_single_load,
};
pub use ports::{
    AdSlotApi,
    AdEventLogger, AdLogEvent, AdRenderer, AdRequest, UnitIdSource,
    LogRecord, MockRenderer, RecordingLogger,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
