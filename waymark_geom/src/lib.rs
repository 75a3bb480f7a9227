// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Geom: the geometry vocabulary shared by the Waymark crates.
//!
//! This crate provides:
//! - [`Matrix`]: an immutable 2D affine transform with a fixed composition
//!   order, inversion, and the `zoom_to_fit` helper used for full-extent views.
//! - [`Path`]: an ordered point sequence whose bounding box is maintained
//!   incrementally, with a clip-and-decimate [`Path::draw`] walk.
//! - [`MapElement`]: a decoded map feature (level, type code, geometry) and
//!   its [`StrokeClass`] color classification.
//!
//! It does **not** decode files or rasterize anything; see `waymark_format`
//! and `waymark_raster` for those.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{BezPath, Point, Rect};
//! use waymark_geom::{DEFAULT_MIN_STEP, MapElement, Matrix, Path, StrokeClass};
//!
//! let geometry: Path = [(0.0, 0.0), (40.0, 0.0), (40.0, 30.0)]
//!     .into_iter()
//!     .map(Point::from)
//!     .collect();
//! let mut element = MapElement::new(-1, 1030, geometry);
//! assert_eq!(element.stroke_class(), StrokeClass::Red);
//!
//! // Move into view space.
//! element.geometry.transform(&Matrix::translate(10.0, 10.0));
//! assert_eq!(element.bounds(), Some(Rect::new(10.0, 10.0, 50.0, 40.0)));
//!
//! // Emit the clipped, decimated outline.
//! let mut out = BezPath::new();
//! element
//!     .geometry
//!     .draw(Rect::new(0.0, 0.0, 100.0, 100.0), DEFAULT_MIN_STEP, &mut out);
//! assert_eq!(out.elements().len(), 3);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod element;
mod matrix;
mod path;

pub use element::{GeometryKind, MapElement, StrokeClass};
pub use matrix::Matrix;
pub use path::{DEFAULT_MIN_STEP, DrawSink, Path};
