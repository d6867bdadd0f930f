//! # Ad Slot Metrics
//!
//! Prometheus metrics for ad slot loading.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! ad-slot-controller = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `adslot_load_requests_total` - Counter of load commands issued (by kind)
//! - `adslot_loads_succeeded_total` - Counter of successful loads (by kind)
//! - `adslot_loads_failed_total` - Counter of failed loads (by kind)
//! - `adslot_duplicate_triggers_suppressed_total` - Counter of visibility events absorbed by the dedup guard
//! - `adslot_stale_callbacks_total` - Counter of renderer callbacks discarded as stale

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Load commands issued, labeled by creative kind
    pub static ref LOAD_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "adslot_load_requests_total",
        "Total number of load commands issued to the renderer",
        &["kind"]
    )
    .expect("Failed to create LOAD_REQUESTS metric");

    /// Successful loads, labeled by creative kind
    pub static ref LOADS_SUCCEEDED: IntCounterVec = register_int_counter_vec!(
        "adslot_loads_succeeded_total",
        "Total number of creatives loaded",
        &["kind"]
    )
    .expect("Failed to create LOADS_SUCCEEDED metric");

    /// Failed loads, labeled by creative kind
    pub static ref LOADS_FAILED: IntCounterVec = register_int_counter_vec!(
        "adslot_loads_failed_total",
        "Total number of loads reported as failed",
        &["kind"]
    )
    .expect("Failed to create LOADS_FAILED metric");

    /// Visibility events that matched a slot past Idle
    pub static ref DUPLICATE_TRIGGERS: IntCounter = register_int_counter!(
        "adslot_duplicate_triggers_suppressed_total",
        "Total number of visibility triggers suppressed by the dedup guard"
    )
    .expect("Failed to create DUPLICATE_TRIGGERS metric");

    /// Callbacks from superseded cycles
    pub static ref STALE_CALLBACKS: IntCounter = register_int_counter!(
        "adslot_stale_callbacks_total",
        "Total number of renderer callbacks discarded as stale"
    )
    .expect("Failed to create STALE_CALLBACKS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a load command issued
#[cfg(feature = "metrics")]
pub fn record_load_requested(kind: &str) {
    LOAD_REQUESTS.with_label_values(&[kind]).inc();
}

/// Record a successful load
#[cfg(feature = "metrics")]
pub fn record_load_succeeded(kind: &str) {
    LOADS_SUCCEEDED.with_label_values(&[kind]).inc();
}

/// Record a failed load
#[cfg(feature = "metrics")]
pub fn record_load_failed(kind: &str) {
    LOADS_FAILED.with_label_values(&[kind]).inc();
}

/// Record a suppressed visibility trigger
#[cfg(feature = "metrics")]
pub fn record_duplicate_trigger() {
    DUPLICATE_TRIGGERS.inc();
}

/// Record a discarded stale callback
#[cfg(feature = "metrics")]
pub fn record_stale_callback() {
    STALE_CALLBACKS.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_load_requested(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_load_succeeded(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_load_failed(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_duplicate_trigger() {}

#[cfg(not(feature = "metrics"))]
pub fn record_stale_callback() {}
