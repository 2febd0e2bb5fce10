// Benchmarks for the survey -> route -> pave pipeline and template
// transforms.
//
// Run with: cargo bench -p blockwright_core

use blockwright_core::block::BlockSpec;
use blockwright_core::builder::{self, HouseParams};
use blockwright_core::config::BuildConfig;
use blockwright_core::path;
use blockwright_core::pave;
use blockwright_core::template::Template;
use blockwright_core::terrain::{self, SurfaceRule, TerrainPalette};
use blockwright_core::transform::Rotation;
use blockwright_core::types::{BlockPos, Column, ColumnRect};
use blockwright_core::world::{MemoryWorld, World};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::collections::BTreeSet;

/// Rolling terrain over `[-extent, extent]^2`: surface height varies with
/// position, three blocks of ground under each surface cell.
fn rolling_world(extent: i32) -> MemoryWorld {
    let mut world = MemoryWorld::new();
    for x in -extent..=extent {
        for z in -extent..=extent {
            let h = 64 + (x / 6 + z / 9).rem_euclid(5);
            world.set(BlockPos::new(x, h - 2, z), BlockSpec::new("stone"));
            world.set(BlockPos::new(x, h - 1, z), BlockSpec::new("dirt"));
            world.set(BlockPos::new(x, h, z), BlockSpec::new("grass_block"));
        }
    }
    world
}

fn bench_surface_sampling(c: &mut Criterion) {
    let config = BuildConfig::default();
    let palette = TerrainPalette::from_classes(&config.materials);
    let world = rolling_world(48);
    let bounds = ColumnRect::from_corners(Column::new(-48, -48), Column::new(48, 48));

    let mut group = c.benchmark_group("surface_sampling");
    group.throughput(Throughput::Elements(bounds.column_count() as u64));
    group.bench_function("97x97_columns", |b| {
        b.iter(|| {
            black_box(terrain::sample_bounds(
                &world,
                bounds,
                &config.scan,
                &palette,
                SurfaceRule::GroundOnly,
            ))
        });
    });
    group.finish();
}

fn bench_route_planning(c: &mut Criterion) {
    let config = BuildConfig::default();
    let palette = TerrainPalette::from_classes(&config.materials);
    let world = rolling_world(48);
    let bounds = ColumnRect::from_corners(Column::new(-48, -48), Column::new(48, 48));
    let heights = terrain::sample_bounds(&world, bounds, &config.scan, &palette, SurfaceRule::GroundOnly);

    // A wall across the middle with one gap forces real search effort.
    let mut blocked = BTreeSet::new();
    for z in -48..=40 {
        blocked.insert(Column::new(0, z));
    }

    c.bench_function("route_97x97_with_detour", |b| {
        b.iter(|| {
            black_box(path::plan_route(
                &heights,
                &blocked,
                Column::new(-40, 0),
                Column::new(40, 0),
                &config.route,
            ))
        });
    });
}

fn bench_paving(c: &mut Criterion) {
    let config = BuildConfig::default();
    let palette = TerrainPalette::from_classes(&config.materials);
    let world = rolling_world(48);
    let bounds = ColumnRect::from_corners(Column::new(-48, -48), Column::new(48, 48));
    let heights = terrain::sample_bounds(&world, bounds, &config.scan, &palette, SurfaceRule::GroundOnly);
    let route = path::plan_route(
        &heights,
        &BTreeSet::new(),
        Column::new(-40, -40),
        Column::new(40, 40),
        &config.route,
    );

    c.bench_function("pave_81_step_route", |b| {
        b.iter(|| {
            let mut scratch = world.clone();
            black_box(pave::pave_route(&mut scratch, &route, &config.paving))
        });
    });
}

fn bench_template_capture_and_rotate(c: &mut Criterion) {
    let mut world = MemoryWorld::new();
    builder::build_simple_house(&mut world, BlockPos::new(0, 64, 0), HouseParams::default());
    let template = Template::capture(&world, BlockPos::new(-1, 63, -1), BlockPos::new(7, 70, 7));

    let mut group = c.benchmark_group("template");
    group.throughput(Throughput::Elements(template.block_count() as u64));
    group.bench_function("capture_house", |b| {
        b.iter(|| {
            black_box(Template::capture(
                &world,
                BlockPos::new(-1, 63, -1),
                BlockPos::new(7, 70, 7),
            ))
        });
    });
    group.bench_function("rotate_house_cw90", |b| {
        b.iter(|| black_box(template.rotated(Rotation::Cw90)));
    });
    group.bench_function("paste_house", |b| {
        b.iter(|| {
            let mut scratch = MemoryWorld::new();
            black_box(template.paste(&mut scratch, BlockPos::new(100, 64, 100)))
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_surface_sampling,
    bench_route_planning,
    bench_paving,
    bench_template_capture_and_rotate
);
criterion_main!(benches);
