use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geomap::{
    noise, GridCoord, MapConfig, Seed, ValueMap, World, WorldConfig,
};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("world-generation");
    group.sample_size(10);

    let config = WorldConfig {
        seed: Seed::Int(1021522790211909),
        map: MapConfig {
            chunk_size: 32,
            chunk_count_x: 8,
            chunk_count_y: 8,
        },
        ..Default::default()
    };
    group.bench_function("world gen", |b| {
        b.iter(|| World::generate(black_box(config.clone())))
    });
    group.finish();

    let mut group = c.benchmark_group("noise");
    group.bench_function("hash2d", |b| {
        b.iter(|| noise::hash2d(black_box(42), black_box(5), black_box(7)))
    });
    group.bench_function("fill perlin 256x256", |b| {
        let mut map = ValueMap::new(256, 256, 255).unwrap();
        b.iter(|| {
            geomap::fill_perlin(
                &mut map,
                black_box(42),
                6,
                GridCoord::ORIGIN,
                0.05,
                None,
            )
        })
    });
    group.bench_function("fill simplex 256x256", |b| {
        let mut map = ValueMap::new(256, 256, 255).unwrap();
        b.iter(|| {
            geomap::fill_simplex(
                &mut map,
                black_box(42),
                6,
                GridCoord::ORIGIN,
                256,
                8,
            )
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
