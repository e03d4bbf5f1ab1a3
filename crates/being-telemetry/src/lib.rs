//! # Being Telemetry
//!
//! Structured logging for Being. services and tools.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use being_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::for_service("phi-check"))?;
//!     // Your application code here
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `being-analytics` | Service name in logs |
//! | `BEING_LOG_LEVEL` | `info` | Log level filter |
//! | `BEING_JSON_LOGS` | `false` (`true` in production) | JSON output |
//! | `BEING_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `BEING_ENVIRONMENT` | `development` | Deployment environment |
//!
//! Dropped analytics events are logged under the `being::analytics::audit`
//! target, so they can be routed or silenced with a directive such as
//! `BEING_LOG_LEVEL=info,being::analytics::audit=off`.

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::build_env_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize structured logging.
///
/// Call once at process start. A second call fails with
/// `TelemetryError::SubscriberInit`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_setup::init_tracing(config)
}

/// Convenience macro for creating a span with component context.
///
/// # Example
///
/// ```rust,ignore
/// use being_telemetry::component_span;
///
/// let _span = component_span!("track_event", component = "analytics_gateway").entered();
/// ```
#[macro_export]
macro_rules! component_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
