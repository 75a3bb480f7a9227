// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Raster: offscreen CPU rendering of map elements.
//!
//! [`Renderer::rebuild`] strokes view-space [`waymark_geom::MapElement`]s into
//! a [`RasterState`] that covers the viewport plus a margin on every side.
//! Each path is clipped to a wider canvas rectangle and decimated by
//! [`waymark_geom::Path::draw`] before it reaches `vello_cpu`.
//!
//! Between rebuilds, a [`RasterState`] can be moved
//! ([`RasterState::reposition`]) or rescaled for zoom feedback
//! ([`RasterState::preview_zoom`]) without touching any geometry.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use waymark_geom::{MapElement, Path};
//! use waymark_raster::{RasterSettings, Renderer};
//!
//! let line: Path = [(10.0, 10.0), (90.0, 10.0)].into_iter().map(Point::from).collect();
//! let element = MapElement::new(-1, 1030, line);
//!
//! let renderer = Renderer::new(RasterSettings {
//!     margin: 0.0,
//!     ..RasterSettings::default()
//! });
//! let raster = renderer
//!     .rebuild(Rect::new(0.0, 0.0, 100.0, 20.0), [&element])
//!     .unwrap();
//! assert_eq!((raster.width(), raster.height()), (100, 20));
//! assert_eq!(raster.placement(), Rect::new(0.0, 0.0, 100.0, 20.0));
//! ```

mod error;
mod raster;
mod renderer;

pub use error::RasterError;
pub use raster::RasterState;
pub use renderer::{RasterSettings, Renderer};

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};
    use waymark_geom::{MapElement, Path};

    use super::{RasterError, RasterSettings, Renderer};

    fn line(points: &[(f64, f64)], type_code: i16) -> MapElement {
        let path: Path = points.iter().copied().map(Point::from).collect();
        MapElement::new(-1, type_code, path)
    }

    fn tight() -> Renderer {
        Renderer::new(RasterSettings {
            margin: 0.0,
            stroke_width: 3.0,
            ..RasterSettings::default()
        })
    }

    #[test]
    fn stroked_pixels_take_the_classification_color() {
        let red = line(&[(0.0, 10.5), (40.0, 10.5)], 1030);
        let raster = tight()
            .rebuild(Rect::new(0.0, 0.0, 40.0, 20.0), [&red])
            .unwrap();
        let px = raster.pixel(20, 10).unwrap();
        assert_eq!(px, [255, 0, 0, 255], "center of a 3px red stroke");
        assert_eq!(raster.pixel(20, 2).unwrap()[3], 0, "untouched pixel");
    }

    #[test]
    fn placement_is_offset_by_margin() {
        let renderer = Renderer::new(RasterSettings {
            margin: 5.0,
            ..RasterSettings::default()
        });
        let raster = renderer
            .rebuild(Rect::new(0.0, 0.0, 10.0, 10.0), core::iter::empty())
            .unwrap();
        assert_eq!(raster.placement(), Rect::new(-5.0, -5.0, 15.0, 15.0));
        assert_eq!((raster.width(), raster.height()), (20, 20));
        assert_eq!(raster.rgba().len(), 20 * 20 * 4);
    }

    #[test]
    fn view_space_maps_to_pixels_relative_to_margin() {
        let renderer = Renderer::new(RasterSettings {
            margin: 10.0,
            stroke_width: 3.0,
            ..RasterSettings::default()
        });
        // A vertical line at view x = 0 lands on pixel column 10.
        let red = line(&[(0.5, -10.0), (0.5, 30.0)], 1030);
        let raster = renderer
            .rebuild(Rect::new(0.0, 0.0, 20.0, 20.0), [&red])
            .unwrap();
        assert_eq!(raster.pixel(10, 20).unwrap(), [255, 0, 0, 255]);
        assert_eq!(raster.pixel(30, 20).unwrap()[3], 0);
    }

    #[test]
    fn elements_stroke_in_order_and_clipped_ones_are_skipped() {
        let red = line(&[(0.0, 10.5), (40.0, 10.5)], 1030);
        let blue = line(&[(0.0, 10.5), (40.0, 10.5)], 2000);
        // Entirely outside the clip rectangle, so nothing is drawn for it.
        let far = line(&[(5_000.0, 10.5), (5_040.0, 10.5)], 1080);
        let raster = tight()
            .rebuild(Rect::new(0.0, 0.0, 40.0, 20.0), [&red, &far, &blue])
            .unwrap();
        assert_eq!(raster.pixel(20, 10).unwrap(), [0, 0, 255, 255]);
        assert_eq!(raster.pixel(20, 2).unwrap()[3], 0);
    }

    #[test]
    fn oversized_viewport_is_rejected() {
        let err = tight()
            .rebuild(Rect::new(0.0, 0.0, 100_000.0, 10.0), core::iter::empty())
            .unwrap_err();
        assert!(matches!(err, RasterError::TooLarge { .. }));
    }
}
