// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic island datasets.
//!
//! The island is a wobbly coastline polygon with a couple of lakes, a ring
//! road with spokes, a street grid around the center, and rows of small
//! buildings. Each layer sits at a different level so level-of-detail
//! filtering is visible when zooming.

use std::f64::consts::TAU;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use tracing::info;
use waymark_format::RecordWriter;

/// Island radius in file units.
const RADIUS: f64 = 60_000.0;
const CENTER: (f64, f64) = (100_000.0, 80_000.0);

pub(crate) fn run(data_dir: &Path, name: &str, detail: u32) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;
    let path = data_dir.join(format!("{name}.dat"));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    let mut writer = RecordWriter::new(BufWriter::new(file));
    write_island(&mut writer, detail.max(16))?;
    let records = writer.records_written();
    writer.finish()?;

    info!(path = %path.display(), records, "dataset written");
    Ok(())
}

fn write_island<W: std::io::Write>(
    writer: &mut RecordWriter<W>,
    detail: u32,
) -> std::io::Result<()> {
    // Coastline, always visible.
    let coast = ring(CENTER, detail, |theta| {
        RADIUS * (1.0 + 0.12 * (5.0 * theta).sin() + 0.05 * (17.0 * theta).sin())
    });
    writer.write_polygon(0, 2000, &[coast.as_slice()])?;

    // Lakes, from bucket 2 on.
    let lake_a = ring((CENTER.0 - 20_000.0, CENTER.1 + 10_000.0), 64, |theta| {
        6_000.0 * (1.0 + 0.2 * (3.0 * theta).cos())
    });
    let lake_b = ring((CENTER.0 + 25_000.0, CENTER.1 - 15_000.0), 48, |_| 3_500.0);
    writer.write_polygon(2, 2500, &[lake_a.as_slice(), lake_b.as_slice()])?;

    // Ring road and spokes.
    let ring_road = ring(CENTER, 256, |_| RADIUS * 0.6);
    writer.write_polyline(-1, 1030, &ring_road)?;
    for spoke in 0..6 {
        let theta = f64::from(spoke) * TAU / 6.0;
        let outer = (
            CENTER.0 + RADIUS * 0.8 * theta.cos(),
            CENTER.1 + RADIUS * 0.8 * theta.sin(),
        );
        writer.write_polyline(-1, 1031, &[to_file(CENTER), to_file(outer)])?;
    }

    // Street grid around the center.
    for i in -5_i32..=5 {
        let offset = f64::from(i) * 2_000.0;
        let half = 10_000.0;
        writer.write_polyline(
            -2,
            1010,
            &[
                to_file((CENTER.0 + offset, CENTER.1 - half)),
                to_file((CENTER.0 + offset, CENTER.1 + half)),
            ],
        )?;
        writer.write_polyline(
            -2,
            1020,
            &[
                to_file((CENTER.0 - half, CENTER.1 + offset)),
                to_file((CENTER.0 + half, CENTER.1 + offset)),
            ],
        )?;
    }

    // Coastal track, finest polyline level.
    let track = ring(CENTER, detail, |theta| {
        RADIUS * (0.9 + 0.1 * (5.0 * theta).sin() + 0.04 * (17.0 * theta).sin())
    });
    writer.write_polyline(-4, 1080, &track)?;

    // Buildings, finest polygon level.
    for row in 0..8 {
        for col in 0..8 {
            let x = CENTER.0 - 7_000.0 + f64::from(col) * 2_000.0 + 300.0;
            let y = CENTER.1 - 7_000.0 + f64::from(row) * 2_000.0 + 300.0;
            let footprint = [
                to_file((x, y)),
                to_file((x + 600.0, y)),
                to_file((x + 600.0, y + 400.0)),
                to_file((x, y + 400.0)),
                to_file((x, y)),
            ];
            writer.write_polygon(4, 9000, &[&footprint[..]])?;
        }
    }
    Ok(())
}

/// Closed ring of `count` vertices whose radius depends on the angle.
fn ring(center: (f64, f64), count: u32, radius: impl Fn(f64) -> f64) -> Vec<(i32, i32)> {
    let mut points: Vec<(i32, i32)> = (0..count)
        .map(|i| {
            let theta = f64::from(i) * TAU / f64::from(count);
            let r = radius(theta);
            to_file((center.0 + r * theta.cos(), center.1 + r * theta.sin()))
        })
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "generated coordinates stay well inside the i32 range"
)]
fn to_file((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}
