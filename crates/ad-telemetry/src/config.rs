//! Telemetry configuration from environment variables.

use std::env;

/// Default service name.
pub const DEFAULT_SERVICE_NAME: &str = "lazy-ad-slot";

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup event
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to emit JSON instead of human-readable lines
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Read the configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `ADSLOT_SERVICE_NAME` | `lazy-ad-slot` |
    /// | `ADSLOT_LOG_LEVEL`, then `RUST_LOG` | `info` |
    /// | `ADSLOT_CONSOLE_OUTPUT` | on |
    /// | `ADSLOT_JSON_LOGS` | off, on inside Kubernetes or Docker |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let in_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("ADSLOT_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: lookup("ADSLOT_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            console_output: lookup("ADSLOT_CONSOLE_OUTPUT")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.console_output),
            json_logs: lookup("ADSLOT_JSON_LOGS")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(in_container),
        }
    }

    /// Same configuration with a different service name.
    #[must_use]
    pub fn for_service(mut self, service_name: &str) -> Self {
        self.service_name = service_name.to_string();
        self
    }
}

/// `1/true/yes/on` and `0/false/no/off`, case-insensitive. Anything else
/// falls back to the default.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
