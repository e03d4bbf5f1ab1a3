//! Counters for analytics gating outcomes
//!
//! Lock-free counters the gateway bumps once per tracked event. They count
//! outcomes only; nothing about event content is recorded.
//!
//! ## Usage
//!
//! ```ignore
//! use being_phi_filter::metrics::FilterMetrics;
//!
//! let metrics = FilterMetrics::new();
//! metrics.record_sent();
//! assert_eq!(metrics.snapshot().sent, 1);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::RejectionReason;

/// Metrics collector for the analytics gateway
#[derive(Debug, Default)]
pub struct FilterMetrics {
    /// Events forwarded to the transport successfully
    pub sent: AtomicU64,
    /// Events dropped because the gateway is switched off
    pub disabled: AtomicU64,
    /// Events dropped because consent was not granted
    pub consent_denied: AtomicU64,
    /// Rejected: name not on the allowlist
    pub rejected_not_whitelisted: AtomicU64,
    /// Rejected: non-scalar property value
    pub rejected_unsupported_shape: AtomicU64,
    /// Rejected: forbidden substring
    pub rejected_forbidden_content: AtomicU64,
    /// Rejected: numeric value under a non-whitelisted key
    pub rejected_unexpected_numeric: AtomicU64,
    /// Allowed events the transport failed to deliver
    pub transport_failures: AtomicU64,
}

impl FilterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sent(&self) {
        self.sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_disabled(&self) {
        self.disabled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_consent_denied(&self) {
        self.consent_denied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejection under the counter for its rule
    pub fn record_rejection(&self, reason: &RejectionReason) {
        let counter = match reason {
            RejectionReason::NotWhitelisted { .. } => &self.rejected_not_whitelisted,
            RejectionReason::UnsupportedShape { .. } => &self.rejected_unsupported_shape,
            RejectionReason::ForbiddenContent { .. } => &self.rejected_forbidden_content,
            RejectionReason::UnexpectedNumeric { .. } => &self.rejected_unexpected_numeric,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transport_failure(&self) {
        self.transport_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let rejected_not_whitelisted = self.rejected_not_whitelisted.load(Ordering::Relaxed);
        let rejected_unsupported_shape = self.rejected_unsupported_shape.load(Ordering::Relaxed);
        let rejected_forbidden_content = self.rejected_forbidden_content.load(Ordering::Relaxed);
        let rejected_unexpected_numeric = self.rejected_unexpected_numeric.load(Ordering::Relaxed);

        MetricsSnapshot {
            sent: self.sent.load(Ordering::Relaxed),
            disabled: self.disabled.load(Ordering::Relaxed),
            consent_denied: self.consent_denied.load(Ordering::Relaxed),
            rejected_not_whitelisted,
            rejected_unsupported_shape,
            rejected_forbidden_content,
            rejected_unexpected_numeric,
            rejected_total: rejected_not_whitelisted
                + rejected_unsupported_shape
                + rejected_forbidden_content
                + rejected_unexpected_numeric,
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.sent.store(0, Ordering::Relaxed);
        self.disabled.store(0, Ordering::Relaxed);
        self.consent_denied.store(0, Ordering::Relaxed);
        self.rejected_not_whitelisted.store(0, Ordering::Relaxed);
        self.rejected_unsupported_shape.store(0, Ordering::Relaxed);
        self.rejected_forbidden_content.store(0, Ordering::Relaxed);
        self.rejected_unexpected_numeric.store(0, Ordering::Relaxed);
        self.transport_failures.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time copy of the counters
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub sent: u64,
    pub disabled: u64,
    pub consent_denied: u64,
    pub rejected_not_whitelisted: u64,
    pub rejected_unsupported_shape: u64,
    pub rejected_forbidden_content: u64,
    pub rejected_unexpected_numeric: u64,
    pub rejected_total: u64,
    pub transport_failures: u64,
}
