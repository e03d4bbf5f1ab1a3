//! Subcommand implementations.
//!
//! Kept apart from `main` so they can be driven from tests with in-memory
//! readers and writers.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use being_phi_filter::{
    AnalyticsEvent, AnalyticsGateway, FilterPolicy, InMemoryConsentStore, MetricsSnapshot,
    NoopTransport, PhiFilter, PolicySource, TrackOutcome, ValidationResult, ANALYTICS_CATEGORY,
};

/// Resolve the policy a command runs against.
///
/// Unlike the app, the tool does not fall back to deny-all: a reviewer
/// pointing at a broken file needs to hear about it.
pub fn resolve_policy(path: Option<&Path>) -> Result<FilterPolicy> {
    let source = match path {
        Some(path) => PolicySource::File(path.to_path_buf()),
        None => PolicySource::Bundled,
    };
    source
        .try_load()
        .with_context(|| format!("loading policy from {:?}", source))
}

/// Validate a single JSON event and write the verdict.
pub fn check(policy: FilterPolicy, input: &str, out: &mut impl Write) -> Result<ValidationResult> {
    let event = AnalyticsEvent::from_json(input).context("parsing event JSON")?;
    let filter = PhiFilter::new(Arc::new(policy));
    let result = filter.validate(&event.name, &event.properties);

    match &result {
        ValidationResult::Allowed => writeln!(out, "allowed")?,
        ValidationResult::Rejected(reason) => writeln!(out, "rejected: {}", reason)?,
    }

    Ok(result)
}

/// Write the effective policy as pretty JSON.
pub fn show_policy(policy: &FilterPolicy, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", policy.to_json_pretty()?)?;
    Ok(())
}

/// Per-line verdict in replay output
#[derive(Debug, Serialize)]
struct ReplayLine<'a> {
    line: usize,
    event: &'a str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Run JSON-lines events through the full gateway (consent granted, no
/// sink) and report each outcome plus the final counters.
pub async fn replay(
    policy: FilterPolicy,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<MetricsSnapshot> {
    let filter = Arc::new(PhiFilter::new(Arc::new(policy)));
    let consent = Arc::new(InMemoryConsentStore::with_granted([ANALYTICS_CATEGORY]));
    let gateway = AnalyticsGateway::new(filter, consent, Arc::new(NoopTransport));

    for (index, line) in input.lines().enumerate() {
        let line = line.context("reading events")?;
        if line.trim().is_empty() {
            continue;
        }
        let event = AnalyticsEvent::from_json(&line)
            .with_context(|| format!("parsing event on line {}", index + 1))?;

        let outcome = gateway.track_event(&event).await;
        let (label, reason) = match &outcome {
            TrackOutcome::Sent => ("allowed", None),
            TrackOutcome::Rejected(reason) => ("rejected", Some(reason.to_string())),
            TrackOutcome::Disabled => ("disabled", None),
            TrackOutcome::ConsentDenied => ("consent_denied", None),
            TrackOutcome::TransportFailed => ("transport_failed", None),
        };

        let record = ReplayLine {
            line: index + 1,
            event: &event.name,
            outcome: label,
            reason,
        };
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    }

    let snapshot = gateway.metrics_snapshot();
    writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
    Ok(snapshot)
}
