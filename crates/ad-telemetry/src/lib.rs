//! # Ad Telemetry
//!
//! Logging bootstrap shared by the workspace binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ad_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Application code here
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ADSLOT_SERVICE_NAME` | `lazy-ad-slot` | Service name in the startup event |
//! | `ADSLOT_LOG_LEVEL` / `RUST_LOG` | `info` | Level filter or `EnvFilter` directives |
//! | `ADSLOT_CONSOLE_OUTPUT` | `true` | Write log lines to stdout |
//! | `ADSLOT_JSON_LOGS` | `false` (`true` in containers) | JSON instead of human-readable lines |

#![warn(missing_docs)]

mod config;
mod logging;
mod tracing_setup;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use tracing_setup::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The level filter could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Install the global `tracing` subscriber.
///
/// Returns a guard that should be held for the lifetime of the application.
///
/// # Errors
/// - `Filter` if `log_level` is not a valid filter
/// - `SubscriberInit` if a global subscriber is already set
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active. Logs a final event on drop.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service the guard was created for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
