use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use cuckoo_collections::CuckooFilter;

fn bench_insert(c: &mut Criterion) {
    let mut initial_items = 0;
    while initial_items < 1024 - 32 {
        c.bench_function(&format!("bench insert {}", initial_items), |b| {
            b.iter_batched_ref(
                || {
                    let mut filter = CuckooFilter::new(1024);
                    for i in 0..initial_items {
                        filter.insert(&u32::to_le_bytes(i));
                    }
                    filter
                },
                |filter| filter.insert(&u32::to_le_bytes(0xDEAD_BEEF)),
                BatchSize::PerIteration,
            )
        });
        initial_items += 128;
    }
}

fn bench_contains(c: &mut Criterion) {
    let mut filter = CuckooFilter::new(1 << 16);
    for i in 0..60_000u32 {
        filter.insert(&i.to_le_bytes());
    }

    c.bench_function("bench contains hit", |b| {
        b.iter(|| filter.contains(&1234u32.to_le_bytes()))
    });
    c.bench_function("bench contains miss", |b| {
        b.iter(|| filter.contains(&0xDEAD_BEEFu32.to_le_bytes()))
    });
}

criterion_group!(benches, bench_insert, bench_contains);
criterion_main!(benches);
