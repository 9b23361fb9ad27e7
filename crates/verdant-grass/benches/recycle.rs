use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use verdant_field::{ElevationField, ElevationParams};
use verdant_geom::Vec3;
use verdant_grass::{GrassConfig, GrassPool};

fn bench_update_still_viewer(c: &mut Criterion) {
    let field = ElevationField::new(&ElevationParams::default());
    let height = |x: f32, z: f32| field.elevation(x, z);
    let cfg = GrassConfig {
        count: 50_000,
        radius: 12.0,
        ..GrassConfig::default()
    };
    let mut pool = GrassPool::new(&cfg, Vec3::ZERO, &height);
    c.bench_function("grass_update_still_50k", |b| {
        b.iter(|| black_box(pool.update(Vec3::ZERO, &height)))
    });
}

fn bench_update_walking_viewer(c: &mut Criterion) {
    let field = ElevationField::new(&ElevationParams::default());
    let height = |x: f32, z: f32| field.elevation(x, z);
    let cfg = GrassConfig {
        count: 50_000,
        radius: 12.0,
        ..GrassConfig::default()
    };
    let mut pool = GrassPool::new(&cfg, Vec3::ZERO, &height);
    let mut x = 0.0f32;
    c.bench_function("grass_update_walking_50k", |b| {
        b.iter(|| {
            // ~5 units/s at 60 fps
            x += 0.083;
            black_box(pool.update(Vec3::new(x, 0.0, 0.0), &height))
        })
    });
}

criterion_group!(benches, bench_update_still_viewer, bench_update_walking_viewer);
criterion_main!(benches);
