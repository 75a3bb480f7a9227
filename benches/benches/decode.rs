// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use waymark_format::{LodPolicy, RecordWriter, decode_records};

/// `records` polylines of `points` vertices laid out on a square grid of
/// 1000-unit cells, alternating between levels -1 and -3.
fn dataset(records: u32, points: u32) -> Vec<u8> {
    let side = f64::from(records).sqrt().ceil() as u32;
    let mut writer = RecordWriter::new(Vec::new());
    for i in 0..records {
        let (cx, cy) = ((i % side) as i32 * 1_000, (i / side) as i32 * 1_000);
        let line: Vec<(i32, i32)> = (0..points as i32)
            .map(|p| (cx + p * 7 % 900, cy + p * 13 % 900))
            .collect();
        let level = if i % 2 == 0 { -1 } else { -3 };
        writer.write_polyline(level, 1030, &line).unwrap();
    }
    writer.finish().unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let policy = LodPolicy::default();

    for records in [256_u32, 4_096] {
        let bytes = dataset(records, 64);
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        // Coarsest bucket: half the records are skipped unread.
        group.bench_with_input(BenchmarkId::new("full", records), &bytes, |b, bytes| {
            b.iter(|| black_box(decode_records(bytes.as_slice(), None, &policy).unwrap()));
        });

        // A narrow query admits every level but only a few cells.
        let query = Rect::new(0.0, 0.0, 2_500.0, 2_500.0);
        group.bench_with_input(BenchmarkId::new("bounded", records), &bytes, |b, bytes| {
            b.iter(|| black_box(decode_records(bytes.as_slice(), Some(query), &policy).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
