//! Benchmarks for the normalize → intersect → rank pipeline.
//!
//! Run with: `cargo bench --bench sweep -p availability-engine`

use std::hint::black_box;

use availability_engine::{intersect, normalize, rank, AvailabilityQuery, BusyInterval};
use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap()
}

/// Deterministic pseudo-random busy intervals over one week.
fn busy_week(participants: usize, per_participant: usize) -> Vec<BusyInterval> {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    let mut busy = Vec::with_capacity(participants * per_participant);
    for p in 0..participants {
        let id = format!("user-{p}");
        for _ in 0..per_participant {
            let start = base() + Duration::minutes((next() % (7 * 24 * 4)) as i64 * 15);
            let len = Duration::minutes((next() % 8 + 1) as i64 * 15);
            busy.push(BusyInterval::new(id.clone(), start, start + len));
        }
    }
    busy
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggested_times");
    let range_end = base() + Duration::days(7);

    for &(participants, per_participant) in &[(3, 20), (10, 50), (50, 100)] {
        let busy = busy_week(participants, per_participant);
        let ids: Vec<String> = (0..participants).map(|p| format!("user-{p}")).collect();
        let query = AvailabilityQuery::new(ids, base(), range_end, 60).unwrap();

        group.throughput(Throughput::Elements(busy.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("normalize_intersect_rank", busy.len()),
            &busy,
            |b, busy| {
                b.iter(|| {
                    let schedules = normalize(black_box(busy), base(), range_end);
                    let segments = intersect(&query, &schedules);
                    black_box(rank(&query, &segments, 5))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
