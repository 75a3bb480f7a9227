// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect, Vec2};
use waymark_geom::Matrix;

/// Offscreen image of the loaded map plus where to show it in view space.
///
/// The image is rebuilt by [`crate::Renderer::rebuild`] after each load.
/// Between rebuilds, interactive gestures only move or rescale the
/// placement rectangle, which is O(1).
#[derive(Clone)]
pub struct RasterState {
    pixels: Vec<u8>,
    width: u16,
    height: u16,
    /// Placement after drags; zoom previews are relative to this.
    settled: Rect,
    placement: Rect,
}

impl fmt::Debug for RasterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterState")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("placement", &self.placement)
            .finish_non_exhaustive()
    }
}

impl RasterState {
    pub(crate) fn new(pixels: Vec<u8>, width: u16, height: u16, placement: Rect) -> Self {
        Self {
            pixels,
            width,
            height,
            settled: placement,
            placement,
        }
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Straight-alpha RGBA8 pixels, row-major, `width * height * 4` bytes.
    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (usize::from(y) * usize::from(self.width) + usize::from(x)) * 4;
        let px = self.pixels.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Where the image should be drawn, in view space.
    #[must_use]
    pub fn placement(&self) -> Rect {
        self.placement
    }

    /// Moves the image by `(dx, dy)` during a drag.
    pub fn reposition(&mut self, dx: f64, dy: f64) {
        let delta = Vec2::new(dx, dy);
        self.settled = self.settled + delta;
        self.placement = self.placement + delta;
    }

    /// Rescales the image by `factor` about `anchor` and keeps the result.
    ///
    /// Used when the geometry itself has been zoomed, so the image stays
    /// aligned with it until the next rebuild. Any preview is dropped.
    pub fn scale_about(&mut self, factor: f64, anchor: Point) {
        self.settled = about(factor, anchor).apply_rect(self.settled);
        self.placement = self.settled;
    }

    /// Rescales the image by `factor` about `anchor` for pinch feedback.
    ///
    /// `factor` is the total scale of the ongoing gesture, not an increment:
    /// each call starts again from the placement before the gesture.
    pub fn preview_zoom(&mut self, factor: f64, anchor: Point) {
        self.placement = about(factor, anchor).apply_rect(self.settled);
    }

    /// Drops any zoom preview and returns to the settled placement.
    pub fn clear_preview(&mut self) {
        self.placement = self.settled;
    }
}

fn about(factor: f64, anchor: Point) -> Matrix {
    Matrix::translate(anchor.x, anchor.y)
        .compose(Matrix::scale(factor, factor))
        .compose(Matrix::translate(-anchor.x, -anchor.y))
}
