//! Outcome of validating an analytics event

use serde::Serialize;
use std::fmt;

/// Which rule rejected an event.
///
/// Meant for the local audit channel only; never sent to the analytics sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RejectionReason {
    /// Event name missing from the allowlist
    NotWhitelisted { event: String },
    /// A property holds something other than a string, number or boolean
    UnsupportedShape { key: String },
    /// A key or value contains a forbidden substring
    ForbiddenContent { substring: String },
    /// A numeric value sits under a key outside the numeric whitelist
    UnexpectedNumeric { key: String },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotWhitelisted { event } => {
                write!(f, "event type not whitelisted: {}", event)
            }
            RejectionReason::UnsupportedShape { key } => {
                write!(f, "unsupported property shape: {}", key)
            }
            RejectionReason::ForbiddenContent { substring } => {
                write!(f, "forbidden content detected: {}", substring)
            }
            RejectionReason::UnexpectedNumeric { key } => {
                write!(f, "unexpected numeric property: {}", key)
            }
        }
    }
}

/// Result of validating one event.
///
/// A reason exists exactly when the event is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    Allowed,
    Rejected(RejectionReason),
}

impl ValidationResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ValidationResult::Allowed)
    }

    pub fn reason(&self) -> Option<&RejectionReason> {
        match self {
            ValidationResult::Allowed => None,
            ValidationResult::Rejected(reason) => Some(reason),
        }
    }
}
