//! # Gateway Flows
//!
//! Drives `AnalyticsGateway` end to end with the bundled policy:
//!
//! ```text
//! [call site] -> ConsentStore -> PhiFilterApi -> AnalyticsTransport -> [sink]
//!                     │               │
//!                     └─ drop         └─ drop + audit log
//! ```
//!
//! Verifies ordering (consent before filter, filter before transport) and
//! that nothing rejected ever reaches the sink.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use being_phi_filter::{
        AnalyticsEvent, AnalyticsGateway, AnalyticsTransport, ConsentStore, FilterPolicy,
        InMemoryConsentStore, PhiFilter, PhiFilterApi, PolicyHandle, PolicySource, Properties,
        RecordingTransport, RejectionReason, TrackOutcome, TransportError, ValidationResult,
        ANALYTICS_CATEGORY,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Filter wrapper that counts how often it is consulted
    struct CountingFilter {
        inner: PhiFilter,
        calls: AtomicUsize,
    }

    impl CountingFilter {
        fn bundled() -> Self {
            Self {
                inner: PhiFilter::new(Arc::new(FilterPolicy::bundled().unwrap())),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PhiFilterApi for CountingFilter {
        fn validate(&self, name: &str, properties: &Properties) -> ValidationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.validate(name, properties)
        }
    }

    /// Consent store that records which categories were asked about
    #[derive(Default)]
    struct AuditingConsent {
        granted: bool,
        asked: Mutex<Vec<String>>,
    }

    impl ConsentStore for AuditingConsent {
        fn can_perform_operation(&self, category: &str) -> bool {
            self.asked.lock().push(category.to_string());
            self.granted
        }
    }

    /// Transport that fails every other call
    #[derive(Default)]
    struct FlakyTransport {
        calls: AtomicUsize,
        delivered: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AnalyticsTransport for FlakyTransport {
        async fn capture(&self, name: &str, _properties: &Properties) -> Result<(), TransportError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n % 2 == 1 {
                return Err(TransportError::Timeout);
            }
            self.delivered.lock().push(name.to_string());
            Ok(())
        }
    }

    fn granted_consent() -> Arc<InMemoryConsentStore> {
        Arc::new(InMemoryConsentStore::with_granted([ANALYTICS_CATEGORY]))
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[tokio::test]
    async fn test_reference_scenarios_through_gateway() {
        let filter = Arc::new(PhiFilter::new(Arc::new(FilterPolicy::bundled().unwrap())));
        let transport = Arc::new(RecordingTransport::new());
        let gateway = AnalyticsGateway::new(filter, granted_consent(), transport.clone());

        let scenarios: Vec<(AnalyticsEvent, bool)> = vec![
            (
                AnalyticsEvent::new("assessment_completed")
                    .with_property("score", 15)
                    .with_property("type", "phq9"),
                false,
            ),
            (AnalyticsEvent::new("assessment_completed").with_property("type", "phq9"), true),
            (AnalyticsEvent::new("mood_recorded").with_property("value", 7), false),
            (AnalyticsEvent::new("screen_viewed").with_property("screen", "mood_check"), false),
            (AnalyticsEvent::new("session_started").with_property("duration", 120), true),
        ];

        for (event, expect_sent) in &scenarios {
            let outcome = gateway.track_event(event).await;
            assert_eq!(outcome.is_sent(), *expect_sent, "{:?} -> {:?}", event, outcome);
        }

        let sent: Vec<String> = transport.captured().into_iter().map(|e| e.name).collect();
        assert_eq!(sent, vec!["assessment_completed", "session_started"]);

        let snapshot = gateway.metrics_snapshot();
        assert_eq!(snapshot.sent, 2);
        assert_eq!(snapshot.rejected_total, 3);
        assert_eq!(snapshot.rejected_not_whitelisted, 1);
    }

    #[tokio::test]
    async fn test_filter_not_consulted_without_consent() {
        let filter = Arc::new(CountingFilter::bundled());
        let consent = Arc::new(AuditingConsent::default());
        let transport = Arc::new(RecordingTransport::new());
        let gateway = AnalyticsGateway::new(filter.clone(), consent.clone(), transport.clone());

        let outcome = gateway.track_event(&AnalyticsEvent::new("app_opened")).await;

        assert_eq!(outcome, TrackOutcome::ConsentDenied);
        assert_eq!(filter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(consent.asked.lock().as_slice(), [ANALYTICS_CATEGORY.to_string()]);
        assert!(transport.is_empty());
    }

    #[tokio::test]
    async fn test_filter_consulted_once_per_event() {
        let filter = Arc::new(CountingFilter::bundled());
        let transport = Arc::new(RecordingTransport::new());
        let gateway = AnalyticsGateway::new(filter.clone(), granted_consent(), transport);

        for _ in 0..3 {
            gateway.track_event(&AnalyticsEvent::new("app_opened")).await;
        }
        assert_eq!(filter.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_transport_failures_never_escape() {
        let filter = Arc::new(PhiFilter::new(Arc::new(FilterPolicy::bundled().unwrap())));
        let transport = Arc::new(FlakyTransport::default());
        let gateway = AnalyticsGateway::new(filter, granted_consent(), transport.clone());

        let mut outcomes = Vec::new();
        for _ in 0..4 {
            outcomes.push(gateway.track_event(&AnalyticsEvent::new("app_opened")).await);
        }

        assert_eq!(
            outcomes,
            vec![
                TrackOutcome::Sent,
                TrackOutcome::TransportFailed,
                TrackOutcome::Sent,
                TrackOutcome::TransportFailed,
            ]
        );
        assert_eq!(transport.delivered.lock().len(), 2);
        assert_eq!(gateway.metrics_snapshot().transport_failures, 2);
    }

    #[tokio::test]
    async fn test_events_from_json_payloads() {
        let filter = Arc::new(PhiFilter::new(Arc::new(FilterPolicy::bundled().unwrap())));
        let transport = Arc::new(RecordingTransport::new());
        let gateway = AnalyticsGateway::new(filter, granted_consent(), transport.clone());

        let nested = AnalyticsEvent::from_json(
            r#"{"name":"screen_viewed","properties":{"screen":"home","meta":{"answers":[3,2,1]}}}"#,
        )
        .unwrap();
        assert_eq!(
            gateway.track_event(&nested).await,
            TrackOutcome::Rejected(RejectionReason::UnsupportedShape { key: "meta".into() })
        );

        let flat = AnalyticsEvent::from_json(
            r#"{"name":"exercise_completed","properties":{"exercise":"breathing","duration":300,"completed":true}}"#,
        )
        .unwrap();
        assert!(gateway.track_event(&flat).await.is_sent());

        assert_eq!(transport.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_tracking_shares_one_gateway() {
        let policy = Arc::new(PolicyHandle::load(&PolicySource::Bundled));
        let transport = Arc::new(RecordingTransport::new());
        let gateway = Arc::new(AnalyticsGateway::new(policy, granted_consent(), transport.clone()));

        let mut tasks = Vec::new();
        for i in 0..16 {
            let gateway = Arc::clone(&gateway);
            tasks.push(tokio::spawn(async move {
                let event = if i % 2 == 0 {
                    AnalyticsEvent::new("screen_viewed").with_property("screen", "home")
                } else {
                    AnalyticsEvent::new("screen_viewed").with_property("screen", "crisis_support")
                };
                gateway.track_event(&event).await
            }));
        }

        let mut sent = 0;
        for task in tasks {
            if task.await.unwrap().is_sent() {
                sent += 1;
            }
        }

        assert_eq!(sent, 8);
        assert_eq!(transport.len(), 8);
        assert_eq!(gateway.metrics_snapshot().rejected_forbidden_content, 8);
    }
}
