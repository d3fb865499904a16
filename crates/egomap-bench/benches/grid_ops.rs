//! Criterion micro-benchmarks for the map primitives.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use egomap_core::{Displacement, PixelShift};
use egomap_grid::{advance, translate, DynamicMap, FootprintMask, GridExtent};
use egomap_test_utils::{reference_footprint, reference_map};

/// Benchmark: wrap every coordinate of the single-wrap domain of E = 100.
fn bench_wrap_domain(c: &mut Criterion) {
    let ext = GridExtent::new(100).unwrap();

    c.bench_function("wrap_domain_e100", |b| {
        b.iter(|| {
            let mut acc = 0i64;
            for coord in -100..=200 {
                acc += i64::from(ext.wrap(black_box(coord)));
            }
            black_box(acc)
        });
    });
}

/// Benchmark: one-pixel diagonal translation on the reference map.
fn bench_translate_unit_diagonal(c: &mut Criterion) {
    let mut map = reference_map();
    let mut sign = 1;

    c.bench_function("translate_unit_diagonal_e100", |b| {
        b.iter(|| {
            sign = -sign;
            let report = translate(&mut map, PixelShift::new(sign, sign)).unwrap();
            black_box(report);
        });
    });
}

/// Benchmark: worst-case translation (half the map) on a 1001 x 1001 map.
fn bench_translate_half_edge_e1000(c: &mut Criterion) {
    let mut map = DynamicMap::new(GridExtent::new(1000).unwrap(), 10.0).unwrap();
    let mut sign = 1;

    c.bench_function("translate_half_edge_e1000", |b| {
        b.iter(|| {
            sign = -sign;
            let report = translate(&mut map, PixelShift::new(500 * sign, 500 * sign)).unwrap();
            black_box(report);
        });
    });
}

/// Benchmark: footprint marking for the reference robot.
fn bench_footprint_apply(c: &mut Criterion) {
    let mut map = reference_map();
    let mask = reference_footprint();

    c.bench_function("footprint_apply_d10", |b| {
        b.iter(|| black_box(mask.apply(&mut map).unwrap()));
    });
}

/// Benchmark: deriving the padding table for a large robot.
fn bench_footprint_derive(c: &mut Criterion) {
    c.bench_function("footprint_derive_d60", |b| {
        b.iter(|| black_box(FootprintMask::for_diameter(black_box(60)).unwrap()));
    });
}

/// Benchmark: drift plan + commit + translate for a sub-pixel step.
fn bench_advance_subpixel(c: &mut Criterion) {
    let mut map = reference_map();
    let mut sign = 1.0f32;

    c.bench_function("advance_subpixel_e100", |b| {
        b.iter(|| {
            sign = -sign;
            let step = map.drift().plan(Displacement::new(7.3 * sign, -4.1 * sign));
            black_box(advance(&mut map, &step).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_wrap_domain,
    bench_translate_unit_diagonal,
    bench_translate_half_edge_e1000,
    bench_footprint_apply,
    bench_footprint_derive,
    bench_advance_subpixel
);
criterion_main!(benches);
