//! # PHI Filter Benchmarks
//!
//! Validation runs on every analytics call, on the UI path. It must stay in
//! the microsecond range.
//!
//! | Case | Target |
//! |------|--------|
//! | Allowed event, 3 properties | < 5µs |
//! | Rejected by allowlist | < 1µs |
//! | Wide event, 32 properties | < 50µs |

use being_phi_filter::{AnalyticsEvent, FilterPolicy, PhiFilter, PolicyHandle, PolicySource};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("phi-filter-validate");
    let filter = PhiFilter::new(Arc::new(FilterPolicy::bundled().expect("bundled policy")));

    let allowed = AnalyticsEvent::new("exercise_completed")
        .with_property("exercise", "breathing")
        .with_property("duration", 300)
        .with_property("completed", true);
    group.bench_function("allowed_small", |b| {
        b.iter(|| black_box(filter.validate(&allowed.name, &allowed.properties)))
    });

    let unlisted = AnalyticsEvent::new("mood_recorded").with_property("value", 7);
    group.bench_function("rejected_allowlist", |b| {
        b.iter(|| black_box(filter.validate(&unlisted.name, &unlisted.properties)))
    });

    for width in [8usize, 32] {
        let mut wide = AnalyticsEvent::new("screen_viewed");
        for i in 0..width {
            wide = wide.with_property(format!("field_{i}"), format!("value number {i}"));
        }
        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::new("wide_event", width), &wide, |b, event| {
            b.iter(|| black_box(filter.validate(&event.name, &event.properties)))
        });
    }

    group.finish();
}

fn bench_policy_handle(c: &mut Criterion) {
    let handle = PolicyHandle::load(&PolicySource::Bundled);
    let event = AnalyticsEvent::new("session_started").with_property("duration", 120);

    c.bench_function("policy_handle_validate", |b| {
        b.iter(|| black_box(handle.validate(&event.name, &event.properties)))
    });
}

criterion_group!(benches, bench_validate, bench_policy_handle);
criterion_main!(benches);
