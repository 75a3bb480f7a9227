// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, BezPath, Rect, Stroke};
use peniko::Color;
use tracing::debug;
use vello_cpu::{Pixmap, RenderContext, RenderMode, RenderSettings};
use waymark_geom::{DEFAULT_MIN_STEP, MapElement};

use crate::{RasterError, RasterState};

/// Tunables for [`Renderer`].
#[derive(Clone, Copy, Debug)]
pub struct RasterSettings {
    /// Extra view-space border rendered around the viewport on every side,
    /// so drags reveal already-drawn content.
    pub margin: f64,
    /// Border added around the raster area when clipping paths. Points in
    /// this band keep segments that cross the raster edge intact.
    pub canvas_margin: f64,
    /// Decimation step passed to [`waymark_geom::Path::draw`].
    pub min_step: f64,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Fill applied before drawing; fully transparent skips the fill.
    pub background: Color,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            margin: 400.0,
            canvas_margin: 1000.0,
            min_step: DEFAULT_MIN_STEP,
            stroke_width: 1.0,
            background: Color::TRANSPARENT,
        }
    }
}

/// Rasterizes view-space map elements into a [`RasterState`] using `vello_cpu`.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    settings: RasterSettings,
}

impl Renderer {
    /// Creates a renderer with the given settings.
    #[must_use]
    pub fn new(settings: RasterSettings) -> Self {
        Self { settings }
    }

    /// The settings in use.
    #[must_use]
    pub fn settings(&self) -> &RasterSettings {
        &self.settings
    }

    /// View-space area covered by a raster built for `viewport`.
    #[must_use]
    pub fn raster_rect(&self, viewport: Rect) -> Rect {
        viewport.abs().inflate(self.settings.margin, self.settings.margin)
    }

    /// View-space clip rectangle used when drawing paths for `viewport`.
    #[must_use]
    pub fn canvas_rect(&self, viewport: Rect) -> Rect {
        self.raster_rect(viewport)
            .inflate(self.settings.canvas_margin, self.settings.canvas_margin)
    }

    /// Draws `elements` (view space) into a new raster covering `viewport`
    /// plus the margin.
    ///
    /// Each element is clipped to [`Renderer::canvas_rect`], decimated, and
    /// stroked in its classification color, in iteration order.
    pub fn rebuild<'a>(
        &self,
        viewport: Rect,
        elements: impl IntoIterator<Item = &'a MapElement>,
    ) -> Result<RasterState, RasterError> {
        let area = self.raster_rect(viewport);
        let (width, height) = pixel_size(area)?;
        let canvas = self.canvas_rect(viewport);

        let settings = RenderSettings {
            render_mode: RenderMode::OptimizeSpeed,
            ..RenderSettings::default()
        };
        let mut ctx = RenderContext::new_with(width, height, settings);

        if self.settings.background.components[3] > 0.0 {
            ctx.set_paint(self.settings.background);
            ctx.fill_rect(&Rect::new(0.0, 0.0, f64::from(width), f64::from(height)));
        }

        // View space -> image pixels.
        ctx.set_transform(Affine::translate((-area.x0, -area.y0)));
        ctx.set_stroke(Stroke::new(self.settings.stroke_width));

        let mut stroked = 0_usize;
        let mut path = BezPath::new();
        for element in elements {
            path.truncate(0);
            element
                .geometry
                .draw(canvas, self.settings.min_step, &mut path);
            if path.elements().len() < 2 {
                continue;
            }
            ctx.set_paint(element.color());
            ctx.stroke_path(&path);
            stroked += 1;
        }

        let mut pixmap = Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let unpremul = pixmap.take_unpremultiplied();
        let mut pixels = Vec::with_capacity(unpremul.len() * 4);
        for p in unpremul {
            pixels.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }

        debug!(width, height, stroked, "rebuilt map raster");
        Ok(RasterState::new(pixels, width, height, area))
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "both dimensions are range-checked against u16::MAX first"
)]
fn pixel_size(area: Rect) -> Result<(u16, u16), RasterError> {
    let width = area.width().ceil();
    let height = area.height().ceil();
    if width.is_nan() || height.is_nan() || width < 1.0 || height < 1.0 {
        return Err(RasterError::Empty);
    }
    let max = f64::from(u16::MAX);
    if width > max || height > max {
        return Err(RasterError::TooLarge { width, height });
    }
    Ok((width as u16, height as u16))
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{RasterSettings, Renderer, pixel_size};
    use crate::RasterError;

    #[test]
    fn raster_and_canvas_rects_grow_by_margins() {
        let renderer = Renderer::new(RasterSettings {
            margin: 10.0,
            canvas_margin: 100.0,
            ..RasterSettings::default()
        });
        let viewport = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(
            renderer.raster_rect(viewport),
            Rect::new(-10.0, -10.0, 210.0, 110.0)
        );
        assert_eq!(
            renderer.canvas_rect(viewport),
            Rect::new(-110.0, -110.0, 310.0, 210.0)
        );
    }

    #[test]
    fn pixel_size_rejects_empty_and_huge_areas() {
        assert_eq!(pixel_size(Rect::new(0.0, 0.0, 0.0, 10.0)), Err(RasterError::Empty));
        assert!(matches!(
            pixel_size(Rect::new(0.0, 0.0, 70_000.0, 10.0)),
            Err(RasterError::TooLarge { .. })
        ));
        assert_eq!(pixel_size(Rect::new(0.0, 0.0, 10.5, 3.0)), Ok((11, 3)));
    }
}
