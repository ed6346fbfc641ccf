use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lift_quota::{
    CandidateUsage, InMemorySkierDirectory, InMemoryTierCatalog, InMemoryUsageLog, MockClock,
    QuotaValidator, ResortId, Skier, SkierId, TierId, TierLimits, UsageEvent, UsageStore,
};
use std::sync::Arc;

/// Validator over a history of `events` usage events spread across the
/// preceding days, clock pinned to a weekday noon.
fn validator_with_history(events: usize) -> QuotaValidator {
    let log = Arc::new(InMemoryUsageLog::new());
    let tiers = Arc::new(InMemoryTierCatalog::new());
    tiers.insert(TierId::new("DEF"), TierLimits::new(1_000_000, 1_000_000, 365, 0));
    let skiers = Arc::new(InMemorySkierDirectory::new());
    skiers.insert(Skier::new(SkierId(1), TierId::new("DEF")));

    let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    for i in 0..events {
        log.append(UsageEvent::new(
            SkierId(1),
            ResortId(1),
            now - Duration::hours(i as i64 + 1),
        ));
    }

    QuotaValidator::builder(log, tiers, skiers)
        .with_clock(Arc::new(MockClock::new(now)))
        .build()
        .unwrap()
}

/// Benchmark a full admit decision at different history sizes.
fn bench_validate_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for &events in &[0usize, 100, 1_000, 10_000] {
        let validator = validator_with_history(events);
        let candidate = CandidateUsage::now(SkierId(1), ResortId(1));

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("admit_with_history", events),
            &candidate,
            |b, candidate| b.iter(|| validator.validate(black_box(candidate))),
        );
    }

    group.finish();
}

/// Benchmark the cheap rejection path (future-dated candidate).
fn bench_reject_fast_path(c: &mut Criterion) {
    let validator = validator_with_history(1_000);
    let future = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let candidate = CandidateUsage::at(SkierId(1), ResortId(1), future);

    c.bench_function("reject_future_date", |b| {
        b.iter(|| validator.validate(black_box(&candidate)))
    });
}

criterion_group!(benches, bench_validate_throughput, bench_reject_fast_path);
criterion_main!(benches);
