//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use folio::publications::PublicationGroups;
use folio::prelude::*;
use folio::{ParticleField, Repulsor, Spotlight};

fn bench_field_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_step");

    for count in [100usize, 500, 2000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let config = FieldConfig {
                particle_count: count,
                ..Default::default()
            };
            let mut rng = StdRng::seed_from_u64(1);
            let mut field = ParticleField::new(Vec2::new(1920.0, 1080.0), &config, &mut rng);
            let repulsors = [
                Repulsor::pointer(Vec2::new(960.0, 540.0), &config),
                Repulsor::spotlight(Vec2::new(900.0, 500.0), &config),
            ];
            b.iter(|| field.step(black_box(&repulsors), &config))
        });
    }

    group.finish();
}

fn bench_spotlight_update(c: &mut Criterion) {
    let config = SpotlightConfig::default();
    let targets: Vec<Target> = (0..60)
        .map(|i| {
            let x = (i % 10) as f32 * 180.0;
            let y = (i / 10) as f32 * 160.0;
            Target::new(Rect::new(x, y, 150.0, 120.0))
        })
        .collect();

    c.bench_function("spotlight_update_60_targets", |b| {
        let mut spot = Spotlight::new(Vec2::ZERO);
        let mut t = 0.0f32;
        b.iter(|| {
            t += 0.01;
            let pointer = Vec2::new(900.0 + 400.0 * t.cos(), 480.0 + 300.0 * t.sin());
            black_box(spot.update(Some(pointer), &targets, &config))
        })
    });
}

fn bench_grouping(c: &mut Criterion) {
    use folio::publications::PublicationRecord;

    let by_year: Vec<(String, Vec<PublicationRecord>)> = (1990..2025)
        .map(|year| {
            let records = (0..20)
                .map(|i| PublicationRecord {
                    title: format!("Paper {}-{}", year, i),
                    year: year.to_string(),
                    ..Default::default()
                })
                .collect();
            (year.to_string(), records)
        })
        .chain(std::iter::once(("Unknown".to_string(), vec![PublicationRecord::default()])))
        .collect();

    c.bench_function("group_700_publications", |b| {
        b.iter(|| black_box(PublicationGroups::new(by_year.clone())))
    });
}

criterion_group!(benches, bench_field_step, bench_spotlight_update, bench_grouping);
criterion_main!(benches);
