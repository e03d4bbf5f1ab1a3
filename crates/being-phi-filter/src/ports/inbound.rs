//! Inbound Ports (Driving Ports)
//!
//! The API that call sites use to ask whether an event may be sent.

use std::sync::Arc;

use crate::domain::{
    evaluate, AnalyticsEvent, FilterPolicy, PhiFilter, PolicyHandle, Properties, ValidationResult,
};

/// PHI filter API (Driving Port)
///
/// Implementations must be pure and total: same input, same result, and no
/// panic for any well-typed input.
pub trait PhiFilterApi: Send + Sync {
    /// Decide whether an event may be forwarded to the analytics sink
    fn validate(&self, name: &str, properties: &Properties) -> ValidationResult;

    /// Convenience wrapper over [`PhiFilterApi::validate`]
    fn validate_event(&self, event: &AnalyticsEvent) -> ValidationResult {
        self.validate(&event.name, &event.properties)
    }
}

impl PhiFilterApi for PhiFilter {
    fn validate(&self, name: &str, properties: &Properties) -> ValidationResult {
        PhiFilter::validate(self, name, properties)
    }
}

impl PhiFilterApi for PolicyHandle {
    fn validate(&self, name: &str, properties: &Properties) -> ValidationResult {
        PolicyHandle::validate(self, name, properties)
    }
}

impl PhiFilterApi for FilterPolicy {
    fn validate(&self, name: &str, properties: &Properties) -> ValidationResult {
        evaluate(self, name, properties)
    }
}

impl<T: PhiFilterApi + ?Sized> PhiFilterApi for Arc<T> {
    fn validate(&self, name: &str, properties: &Properties) -> ValidationResult {
        (**self).validate(name, properties)
    }
}
