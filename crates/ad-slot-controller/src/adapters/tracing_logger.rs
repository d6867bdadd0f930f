//! `AdEventLogger` on top of `tracing`.

use crate::ports::{AdEventLogger, AdLogEvent};
use tracing::{debug, info, warn};

/// Log sink that emits one `tracing` event per ad log entry.
///
/// Failures go out at `warn`, "NOT IN VIEW" chatter at `debug`, everything
/// else at `info`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAdLogger;

impl TracingAdLogger {
    /// Create the logger.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AdEventLogger for TracingAdLogger {
    fn log(
        &self,
        category: &str,
        event: AdLogEvent,
        message: &str,
        detail: Option<&serde_json::Value>,
    ) {
        let detail = detail.map(ToString::to_string).unwrap_or_default();
        let name = event.as_str();

        match event {
            AdLogEvent::Failed => warn!(category, event = name, detail = %detail, "{message}"),
            AdLogEvent::NotInView => debug!(category, event = name, "{message}"),
            _ => info!(category, event = name, detail = %detail, "{message}"),
        }
    }
}
