//! # Domain Errors
//!
//! Error types for the ad slot controller.
//!
//! Load failures reported by the renderer are not errors at this level:
//! they become `SlotStatus::Failed`. These variants cover caller mistakes
//! and invalid configuration only.

use super::state::SlotStatus;
use shared_types::CreativeKind;
use thiserror::Error;

/// Ad slot error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdSlotError {
    /// Aspect ratio was zero, negative, NaN or infinite.
    #[error("Invalid aspect ratio: {0} (must be positive and finite)")]
    InvalidAspectRatio(f64),

    /// No ad-unit identifier is configured for a creative kind.
    #[error("No ad unit id configured for {0} creatives")]
    MissingUnitId(CreativeKind),

    /// The requested operation is not allowed from the current status.
    #[error("Cannot {operation} while slot is {from:?}")]
    InvalidTransition {
        /// Status the slot was in
        from: SlotStatus,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Configuration value rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for slot operations.
pub type AdSlotResult<T> = Result<T, AdSlotError>;
