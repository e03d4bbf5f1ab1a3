//! PHI filter
//!
//! Decides whether an analytics event may reach the third-party sink.
//! Checks run in this order and stop at the first failure:
//!
//! 1. Event name is on the allowlist (exact, case-sensitive)
//! 2. Every property value is a string, number or boolean
//! 3. No key or value contains a forbidden substring (case-insensitive)
//! 4. Numeric values only appear under whitelisted keys
//!
//! Validation is pure: no I/O, no logging, no shared mutation. Anything the
//! rules do not recognise is rejected.
//!
//! Substring matching over-blocks (e.g. "mood" inside an unrelated word) and
//! only catches enumerated terms. Keep the keyword list under compliance
//! review rather than loosening the match.

use std::sync::Arc;

use super::event::Properties;
use super::policy::FilterPolicy;
use super::validation::{RejectionReason, ValidationResult};

/// Joins scanned fields so a substring cannot straddle two of them.
const FIELD_SEPARATOR: char = '\u{1f}';

/// Stateless filter bound to one immutable policy
#[derive(Clone, Debug)]
pub struct PhiFilter {
    policy: Arc<FilterPolicy>,
}

impl PhiFilter {
    pub fn new(policy: Arc<FilterPolicy>) -> Self {
        Self { policy }
    }

    /// Filter that rejects everything
    pub fn deny_all() -> Self {
        Self::new(Arc::new(FilterPolicy::deny_all()))
    }

    pub fn policy(&self) -> &Arc<FilterPolicy> {
        &self.policy
    }

    /// Validate an event against this filter's policy
    pub fn validate(&self, name: &str, properties: &Properties) -> ValidationResult {
        evaluate(&self.policy, name, properties)
    }
}

/// Run the ordered checks against `policy`
pub fn evaluate(policy: &FilterPolicy, name: &str, properties: &Properties) -> ValidationResult {
    if !policy.allows_event(name) {
        return ValidationResult::Rejected(RejectionReason::NotWhitelisted {
            event: name.to_string(),
        });
    }

    if let Some((key, _)) = properties.iter().find(|(_, value)| !value.is_scalar()) {
        return ValidationResult::Rejected(RejectionReason::UnsupportedShape { key: key.clone() });
    }

    if !policy.forbidden_substrings().is_empty() {
        let haystack = scan_text(properties);
        if let Some(substring) = policy
            .forbidden_substrings()
            .iter()
            .find(|s| haystack.contains(s.as_str()))
        {
            return ValidationResult::Rejected(RejectionReason::ForbiddenContent {
                substring: substring.clone(),
            });
        }
    }

    if let Some((key, _)) = properties
        .iter()
        .find(|(key, value)| value.is_numeric() && !policy.permits_numeric(key))
    {
        return ValidationResult::Rejected(RejectionReason::UnexpectedNumeric { key: key.clone() });
    }

    ValidationResult::Allowed
}

/// Lowercased keys and values in key order, separated by `FIELD_SEPARATOR`
fn scan_text(properties: &Properties) -> String {
    let mut text = String::new();
    for (key, value) in properties {
        text.push_str(&key.to_lowercase());
        text.push(FIELD_SEPARATOR);
        text.push_str(&value.to_string().to_lowercase());
        text.push(FIELD_SEPARATOR);
    }
    text
}
