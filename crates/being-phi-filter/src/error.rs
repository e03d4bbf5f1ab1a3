//! Error types for the PHI filter subsystem
//!
//! Rejecting an event is not an error: it is a `ValidationResult`. The types
//! here cover the two places that can genuinely fail, loading a policy and
//! handing an event to the analytics transport.

use thiserror::Error;

/// Errors raised while building or loading a filter policy
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Policy document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read policy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid event name in allowlist: {0:?}")]
    InvalidEventName(String),

    #[error("Invalid forbidden substring: {0:?}")]
    InvalidForbiddenSubstring(String),

    #[error("Invalid numeric whitelist key: {0:?}")]
    InvalidNumericKey(String),
}

/// Errors from an analytics transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Analytics sink unavailable: {0}")]
    Unavailable(String),

    #[error("Timeout")]
    Timeout,
}
