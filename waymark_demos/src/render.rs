// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless rendering of a dataset to PNG.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use kurbo::{Point, Rect};
use png::{BitDepth, ColorType, Encoder};
use tracing::info;
use waymark_view::{DirectorySource, LoadEvent, RasterState, ViewConfig, Viewport};

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Dataset name, resolved as `<data-dir>/<name>.dat`
    dataset: String,

    /// Output image
    #[arg(long, short, default_value = "map.png")]
    out: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    width: u16,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600)]
    height: u16,

    /// Zoom factor applied about the viewport center after the full load
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    /// Horizontal pan in pixels, applied before zooming
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,

    /// Vertical pan in pixels, applied before zooming
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,

    /// Write the whole raster, including the off-screen margin
    #[arg(long)]
    with_margin: bool,
}

pub(crate) fn run(data_dir: &Path, args: &RenderArgs) -> anyhow::Result<()> {
    let rect = Rect::new(0.0, 0.0, f64::from(args.width), f64::from(args.height));
    let mut view = Viewport::new(DirectorySource::new(data_dir), rect, ViewConfig::default());

    view.load_dataset(&args.dataset)?;
    settle(&mut view)?;

    if args.pan_x != 0.0 || args.pan_y != 0.0 || args.zoom != 1.0 {
        view.pan(args.pan_x, args.pan_y);
        view.zoom_by(args.zoom, rect.center());
        view.request_reload()?;
        settle(&mut view)?;
    }

    let raster = view
        .current_raster()
        .context("no raster was produced")?;
    let (width, height, pixels) = if args.with_margin {
        (raster.width(), raster.height(), raster.rgba().to_vec())
    } else {
        (args.width, args.height, crop(raster, args.width, args.height))
    };
    write_png(&args.out, width, height, &pixels)?;

    info!(
        out = %args.out.display(),
        width,
        height,
        effective_scale = view.effective_scale(),
        "map written"
    );
    Ok(())
}

/// Waits for the in-flight load and turns anything but an install into an error.
fn settle(view: &mut Viewport) -> anyhow::Result<()> {
    match view.wait() {
        Some(LoadEvent::Installed { elements, full }) => {
            info!(elements, full, "loaded");
            Ok(())
        }
        Some(LoadEvent::Failed(err)) => Err(err.into()),
        Some(LoadEvent::Discarded) => bail!("load result was discarded"),
        None => bail!("no load was in flight"),
    }
}

/// Copies the visible `width` x `height` area out of the raster.
///
/// The viewport starts at the view-space origin, so its offset into the
/// image is the negated placement origin.
fn crop(raster: &RasterState, width: u16, height: u16) -> Vec<u8> {
    let offset = Point::ZERO - raster.placement().origin();
    let (x0, y0) = (pixel_offset(offset.x), pixel_offset(offset.y));
    let mut pixels = Vec::with_capacity(usize::from(width) * usize::from(height) * 4);
    for y in 0..height {
        for x in 0..width {
            let px = raster
                .pixel(x0.saturating_add(x), y0.saturating_add(y))
                .unwrap_or([0; 4]);
            pixels.extend_from_slice(&px);
        }
    }
    pixels
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the raster margin is far below u16::MAX"
)]
fn pixel_offset(v: f64) -> u16 {
    v.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

fn write_png(path: &Path, width: u16, height: u16, pixels: &[u8]) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut encoder = Encoder::new(BufWriter::new(file), width.into(), height.into());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixels)?;
    Ok(())
}
