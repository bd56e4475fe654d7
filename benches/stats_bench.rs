//! Benchmarks for replog statistics and storage
//!
//! Run with: cargo bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use replog::export::records_to_csv;
use replog::stats::{kst, StatsEngine};
use replog::storage::{ExerciseRecord, JsonFileStore, RecordStore};
use tempfile::tempdir;

const EXERCISES: [&str; 4] = ["push-up", "squat", "스쿼트", "plank"];

fn create_test_records(count: usize) -> Vec<ExerciseRecord> {
    let base = kst().with_ymd_and_hms(2024, 3, 31, 20, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let at = base - Duration::minutes(i as i64 * 37);
            let exercise = EXERCISES[i % EXERCISES.len()];
            let record = ExerciseRecord::new(exercise).datetime(at.to_rfc3339());
            if exercise == "plank" {
                record.duration(60)
            } else {
                record.reps(10 + (i % 15) as u64)
            }
        })
        .collect()
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");
    let engine = StatsEngine::default();
    let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();

    for size in [100, 1000, 10000] {
        let records = create_test_records(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("default_window_{}", size), |b| {
            b.iter(|| engine.compute(black_box(&records), None, None, now).unwrap())
        });

        group.bench_function(format!("explicit_window_{}", size), |b| {
            b.iter(|| {
                engine
                    .compute(black_box(&records), Some("2024-01-01"), Some("2024-03-31"), now)
                    .unwrap()
            })
        });

        group.bench_function(format!("recent_{}", size), |b| {
            b.iter(|| engine.recent_records(black_box(&records)))
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let records = create_test_records(1000);

    group.throughput(Throughput::Elements(1000));
    group.bench_function("csv_1000", |b| {
        b.iter(|| records_to_csv(black_box(&records)).unwrap())
    });

    group.finish();
}

fn bench_file_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("file_store");

    group.bench_function("append_single", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let dir = tempdir().unwrap();
                let store = JsonFileStore::new(dir.path().join("records.json"));

                let start = std::time::Instant::now();

                for _ in 0..iters {
                    store
                        .append(ExerciseRecord::new("squat").reps(10))
                        .await
                        .unwrap();
                }

                start.elapsed()
            })
        });
    });

    group.bench_function("read_all_1000", |b| {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("records.json"));
        rt.block_on(async {
            for record in create_test_records(1000) {
                store.append(record).await.unwrap();
            }
        });

        b.iter(|| rt.block_on(store.read_all()).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_stats, bench_export, bench_file_store);
criterion_main!(benches);
