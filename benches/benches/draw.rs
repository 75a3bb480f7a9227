// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{BezPath, Point, Rect};
use waymark_geom::{DEFAULT_MIN_STEP, MapElement, Matrix, Path};
use waymark_raster::{RasterSettings, Renderer};

/// A dense spiral: most consecutive points are closer than the decimation step.
fn spiral(points: usize) -> Path {
    (0..points)
        .map(|i| {
            let t = i as f64 * 0.01;
            Point::new(500.0 + t * 20.0 * t.cos(), 400.0 + t * 20.0 * t.sin())
        })
        .collect()
}

fn bench_path_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("path/draw");
    let canvas = Rect::new(0.0, 0.0, 1_000.0, 800.0);

    for points in [1_000_usize, 20_000] {
        let path = spiral(points);
        group.throughput(Throughput::Elements(points as u64));
        group.bench_with_input(BenchmarkId::new("decimated", points), &path, |b, path| {
            b.iter(|| {
                let mut out = BezPath::new();
                path.draw(canvas, DEFAULT_MIN_STEP, &mut out);
                black_box(out);
            });
        });
        group.bench_with_input(BenchmarkId::new("every_point", points), &path, |b, path| {
            b.iter(|| {
                let mut out = BezPath::new();
                path.draw(canvas, 0.0, &mut out);
                black_box(out);
            });
        });
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let path = spiral(20_000);
    let delta = Matrix::translate(3.0, -2.0);
    c.bench_function("path/transform_20000", |b| {
        b.iter(|| black_box(path.transformed(&delta)));
    });
}

fn bench_rebuild(c: &mut Criterion) {
    let elements: Vec<MapElement> = (0..64_i16)
        .map(|i| MapElement::new(-1, 1000 + i * 20, spiral(2_000)))
        .collect();
    let renderer = Renderer::new(RasterSettings::default());
    let viewport = Rect::new(0.0, 0.0, 1_000.0, 800.0);
    c.bench_function("raster/rebuild_64x2000", |b| {
        b.iter(|| black_box(renderer.rebuild(viewport, &elements).unwrap()));
    });
}

criterion_group!(benches, bench_path_draw, bench_transform, bench_rebuild);
criterion_main!(benches);
