//! # Policy Reload Flows
//!
//! File-backed policies loaded at startup and swapped while the gateway is
//! live. A broken file must never widen what gets through.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use being_phi_filter::{
        AnalyticsEvent, AnalyticsGateway, InMemoryConsentStore, PolicyHandle, PolicySource,
        RecordingTransport, RejectionReason, TrackOutcome, ANALYTICS_CATEGORY,
    };

    fn write_policy(dir: &tempfile::TempDir, name: &str, json: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, json).unwrap();
        path
    }

    #[tokio::test]
    async fn test_corrupt_startup_policy_blocks_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_policy(&dir, "policy.json", "{\"allowed_event_names\": [");

        let policy = Arc::new(PolicyHandle::load(&PolicySource::File(path)));
        let consent = Arc::new(InMemoryConsentStore::with_granted([ANALYTICS_CATEGORY]));
        let transport = Arc::new(RecordingTransport::new());
        let gateway = AnalyticsGateway::new(policy, consent, transport.clone());

        let outcome = gateway.track_event(&AnalyticsEvent::new("app_opened")).await;
        assert_eq!(
            outcome,
            TrackOutcome::Rejected(RejectionReason::NotWhitelisted {
                event: "app_opened".into()
            })
        );
        assert!(transport.is_empty());
    }

    #[tokio::test]
    async fn test_reload_takes_effect_for_next_event() {
        let dir = tempfile::tempdir().unwrap();
        let v1 = write_policy(
            &dir,
            "v1.json",
            r#"{"allowed_event_names":["app_opened","screen_viewed"],"forbidden_substrings":["mood"]}"#,
        );
        let v2 = write_policy(
            &dir,
            "v2.json",
            r#"{"allowed_event_names":["app_opened"],"forbidden_substrings":["mood"]}"#,
        );

        let policy = Arc::new(PolicyHandle::load(&PolicySource::File(v1)));
        let consent = Arc::new(InMemoryConsentStore::with_granted([ANALYTICS_CATEGORY]));
        let transport = Arc::new(RecordingTransport::new());
        let gateway = AnalyticsGateway::new(policy.clone(), consent, transport.clone());

        let event = AnalyticsEvent::new("screen_viewed").with_property("screen", "home");
        assert!(gateway.track_event(&event).await.is_sent());

        policy.reload(&PolicySource::File(v2)).unwrap();
        assert!(!gateway.track_event(&event).await.is_sent());
        assert_eq!(transport.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_serving_previous_policy() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_policy(&dir, "good.json", r#"{"allowed_event_names":["app_opened"]}"#);
        let bad = write_policy(&dir, "bad.json", r#"{"allowed_event_names":[""]}"#);

        let policy = Arc::new(PolicyHandle::load(&PolicySource::File(good)));
        let consent = Arc::new(InMemoryConsentStore::with_granted([ANALYTICS_CATEGORY]));
        let transport = Arc::new(RecordingTransport::new());
        let gateway = AnalyticsGateway::new(policy.clone(), consent, transport);

        assert!(policy.reload(&PolicySource::File(bad)).is_err());
        assert!(gateway
            .track_event(&AnalyticsEvent::new("app_opened"))
            .await
            .is_sent());
    }
}
