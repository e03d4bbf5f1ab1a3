//! Analytics Gateway
//!
//! The single path from a call site to the analytics sink:
//! consent check, then PHI filter, then transport.
//!
//! Nothing here is ever surfaced to the user. A dropped event is logged to
//! the local audit target and counted, then forgotten.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{AnalyticsEvent, Properties, RejectionReason, ValidationResult};
use crate::metrics::{FilterMetrics, MetricsSnapshot};
use crate::ports::{AnalyticsTransport, ConsentStore, PhiFilterApi, ANALYTICS_CATEGORY};

/// Tracing target for dropped-event audit records
pub const AUDIT_TARGET: &str = "being::analytics::audit";

/// Gateway configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Master switch; when false every event is dropped before consent
    pub enabled: bool,
    /// Consent category that must be granted for analytics
    pub consent_category: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            consent_category: ANALYTICS_CATEGORY.to_string(),
        }
    }
}

/// What happened to a tracked event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackOutcome {
    /// Delivered to the transport
    Sent,
    /// Analytics disabled in configuration
    Disabled,
    /// User has not granted the consent category
    ConsentDenied,
    /// The PHI filter rejected the event
    Rejected(RejectionReason),
    /// Allowed, but the transport failed
    TransportFailed,
}

impl TrackOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, TrackOutcome::Sent)
    }
}

/// Analytics gateway service
///
/// Wires the filter port to the consent and transport ports.
pub struct AnalyticsGateway<F, C, T>
where
    F: PhiFilterApi,
    C: ConsentStore,
    T: AnalyticsTransport,
{
    filter: Arc<F>,
    consent: Arc<C>,
    transport: Arc<T>,
    config: GatewayConfig,
    metrics: Arc<FilterMetrics>,
}

impl<F, C, T> AnalyticsGateway<F, C, T>
where
    F: PhiFilterApi,
    C: ConsentStore,
    T: AnalyticsTransport,
{
    pub fn new(filter: Arc<F>, consent: Arc<C>, transport: Arc<T>) -> Self {
        Self::with_config(filter, consent, transport, GatewayConfig::default())
    }

    pub fn with_config(
        filter: Arc<F>,
        consent: Arc<C>,
        transport: Arc<T>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            filter,
            consent,
            transport,
            config,
            metrics: Arc::new(FilterMetrics::new()),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<FilterMetrics> {
        &self.metrics
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Track an event
    pub async fn track_event(&self, event: &AnalyticsEvent) -> TrackOutcome {
        self.track(&event.name, &event.properties).await
    }

    /// Track an event given as name and properties
    pub async fn track(&self, name: &str, properties: &Properties) -> TrackOutcome {
        if !self.config.enabled {
            self.metrics.record_disabled();
            debug!(event = name, "Analytics disabled, event dropped");
            return TrackOutcome::Disabled;
        }

        if !self.consent.can_perform_operation(&self.config.consent_category) {
            self.metrics.record_consent_denied();
            debug!(
                event = name,
                category = %self.config.consent_category,
                "Analytics consent not granted, event dropped"
            );
            return TrackOutcome::ConsentDenied;
        }

        match self.filter.validate(name, properties) {
            ValidationResult::Allowed => {}
            ValidationResult::Rejected(reason) => {
                self.metrics.record_rejection(&reason);
                // Name and reason only; property values never reach the log.
                info!(
                    target: AUDIT_TARGET,
                    event = name,
                    reason = %reason,
                    "Analytics event rejected by PHI filter"
                );
                return TrackOutcome::Rejected(reason);
            }
        }

        match self.transport.capture(name, properties).await {
            Ok(()) => {
                self.metrics.record_sent();
                debug!(event = name, "Analytics event sent");
                TrackOutcome::Sent
            }
            Err(e) => {
                self.metrics.record_transport_failure();
                warn!(event = name, error = %e, "Analytics transport failed, event dropped");
                TrackOutcome::TransportFailed
            }
        }
    }
}
