use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use spatial_sort::{hilbert, morton, AxisSelection, Coordinate, SpatialSort, Vec3};

pub fn morton_benchmark(c: &mut Criterion) {
    c.bench_function("morton 2d min", |b| {
        b.iter(|| morton::encode_2d(black_box([0; 2])))
    });
    c.bench_function("morton 2d max", |b| {
        b.iter(|| morton::encode_2d(black_box([Coordinate::MAX; 2])))
    });
    c.bench_function("morton 3d max", |b| {
        b.iter(|| morton::encode_3d(black_box([Coordinate::MAX; 3])))
    });
}

pub fn hilbert_benchmark(c: &mut Criterion) {
    c.bench_function("hilbert 2d min", |b| {
        b.iter(|| hilbert::index_2d(black_box([0; 2])))
    });
    c.bench_function("hilbert 2d max", |b| {
        b.iter(|| hilbert::index_2d(black_box([Coordinate::MAX; 2])))
    });
    c.bench_function("hilbert 3d max", |b| {
        b.iter(|| hilbert::index_3d(black_box([Coordinate::MAX; 3])))
    });
}

pub fn sort_benchmark(c: &mut Criterion) {
    const NUM_POINTS: usize = 10_000;
    let mut rng = StdRng::seed_from_u64(0);
    let points = (0..NUM_POINTS)
        .map(|_| Vec3::new(rng.gen(), rng.gen(), rng.gen()))
        .collect::<Vec<_>>();

    let mut group = c.benchmark_group("sort");
    group.throughput(Throughput::Elements(NUM_POINTS as u64));
    group.bench_function("morton", |b| {
        b.iter_batched_ref(
            || points.clone(),
            |points| points.spatial_sort_fast(AxisSelection::Xyz, None),
            BatchSize::LargeInput,
        )
    });
    group.bench_function("hilbert", |b| {
        b.iter_batched_ref(
            || points.clone(),
            |points| points.spatial_sort(AxisSelection::Xyz, None),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, morton_benchmark, hilbert_benchmark, sort_benchmark);
criterion_main!(benches);
