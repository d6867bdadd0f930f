//! # Error Types
//!
//! Error descriptors reported across the renderer boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by the renderer for one load attempt.
///
/// Non-fatal: the slot records it and shows a neutral placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("ad failed to load: {message}")]
pub struct AdLoadError {
    /// Human-readable reason (e.g. "no fill").
    pub message: String,
    /// Network-specific error code, when the renderer has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

impl AdLoadError {
    /// Create an error with a message and no code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Attach a network error code.
    #[must_use]
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }
}
