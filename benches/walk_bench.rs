//! Criterion micro-benchmarks for walking fetch results.
//!
//! These benchmarks compare:
//! - Pull iteration with `record_iter`
//! - Callback iteration with `each_record`
//! - Topic grouping with `each_topic` across several responses
//!
//! Run with: `cargo bench --bench walk_bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use kafkaesque_fetch::fetch::{Fetch, FetchPartition, FetchTopic, Fetches};
use kafkaesque_fetch::record::slice_record;

/// `brokers` responses, each with 4 topics of 8 partitions. Every other
/// partition is empty to exercise the skip path.
fn batch(brokers: usize, records_per_partition: usize) -> Fetches {
    let payload = bytes::Bytes::from(vec![0u8; 64]);
    (0..brokers)
        .map(|b| {
            Fetch::new(
                (0..4)
                    .map(|t| {
                        let partitions = (0..8)
                            .map(|p| FetchPartition {
                                partition: (b * 8 + p) as i32,
                                records: if p % 2 == 0 {
                                    (0..records_per_partition)
                                        .map(|_| slice_record(payload.clone()))
                                        .collect()
                                } else {
                                    vec![]
                                },
                                ..Default::default()
                            })
                            .collect();
                        FetchTopic::new(format!("topic-{t}"), partitions)
                    })
                    .collect(),
            )
        })
        .collect()
}

fn bench_record_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_walk");

    for records in [1, 16, 256].iter() {
        let fetches = batch(3, *records);
        group.throughput(Throughput::Elements(fetches.num_records() as u64));

        group.bench_with_input(BenchmarkId::new("record_iter", records), records, |b, _| {
            b.iter(|| {
                let mut bytes = 0;
                for record in fetches.record_iter() {
                    bytes += record.value.len();
                }
                black_box(bytes)
            });
        });

        group.bench_with_input(BenchmarkId::new("each_record", records), records, |b, _| {
            b.iter(|| {
                let mut bytes = 0;
                fetches.each_record(|r| bytes += r.value.len());
                black_box(bytes)
            });
        });
    }

    group.finish();
}

fn bench_each_topic(c: &mut Criterion) {
    let mut group = c.benchmark_group("each_topic");

    for brokers in [1, 4, 16].iter() {
        let fetches = batch(*brokers, 4);
        group.bench_with_input(BenchmarkId::new("merge", brokers), brokers, |b, _| {
            b.iter(|| {
                let mut partitions = 0;
                fetches.each_topic(|view| partitions += view.num_partitions());
                black_box(partitions)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_record_walk, bench_each_topic);
criterion_main!(benches);
