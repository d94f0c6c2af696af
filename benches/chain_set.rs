use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bedrock_rs::container::ChainSet;

const OPS_PER_ITER: u64 = 10_000;

/// Steady-state churn: every add is paired with a remove, so the table never
/// grows and the vacancy list stays hot.
fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_set");
    group.throughput(Throughput::Elements(OPS_PER_ITER));

    group.bench_function("add_remove_churn", |b| {
        let mut set = ChainSet::new();
        b.iter(|| {
            for value in 0..OPS_PER_ITER {
                set.add(black_box(value));
                set.remove(black_box(&value));
            }
        })
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_set_lookup");
    group.throughput(Throughput::Elements(OPS_PER_ITER));

    for population in [1_000u64, 100_000] {
        let mut set = ChainSet::new();
        for value in 0..population {
            set.add(value);
        }

        group.bench_with_input(BenchmarkId::new("hit", population), &set, |b, set| {
            b.iter(|| {
                let mut found = 0u64;
                for value in 0..OPS_PER_ITER {
                    if set.contains(black_box(&(value % population))) {
                        found += 1;
                    }
                }
                black_box(found)
            })
        });

        group.bench_with_input(BenchmarkId::new("miss", population), &set, |b, set| {
            b.iter(|| {
                let mut found = 0u64;
                for value in 0..OPS_PER_ITER {
                    if set.contains(black_box(&(population + value))) {
                        found += 1;
                    }
                }
                black_box(found)
            })
        });
    }

    group.finish();
}

/// Cold growth from an empty table, resizes included.
fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_set_growth");

    for population in [1_000u64, 10_000] {
        group.throughput(Throughput::Elements(population));
        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &population,
            |b, &population| {
                b.iter(|| {
                    let mut set = ChainSet::new();
                    for value in 0..population {
                        set.add(black_box(value));
                    }
                    black_box(set.len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_churn, bench_lookup, bench_growth);
criterion_main!(benches);
