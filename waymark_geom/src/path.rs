// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};

use crate::Matrix;

/// Default decimation step in view units.
///
/// During [`Path::draw`], a point closer than this (Manhattan distance) to the
/// previously emitted point is skipped.
pub const DEFAULT_MIN_STEP: f64 = 5.0;

/// Receiver for the move/line commands produced by [`Path::draw`].
///
/// Rendering backends implement this to build their own path type without
/// going through an intermediate allocation.
pub trait DrawSink {
    /// Starts a new subpath at `pt`.
    fn move_to(&mut self, pt: Point);
    /// Extends the current subpath with a straight segment to `pt`.
    fn line_to(&mut self, pt: Point);
}

impl DrawSink for BezPath {
    fn move_to(&mut self, pt: Point) {
        Self::move_to(self, pt);
    }

    fn line_to(&mut self, pt: Point) {
        Self::line_to(self, pt);
    }
}

/// Ordered point sequence with an incrementally maintained bounding box.
///
/// Polylines and flattened polygon rings are both stored as a single `Path`.
/// The bounding box always equals the exact min/max over every point pushed so
/// far; the first point initializes it to a zero-area rectangle at that point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    points: Vec<Point>,
    bbox: Rect,
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty path with room for `capacity` points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            bbox: Rect::ZERO,
        }
    }

    /// Appends a point and grows the bounding box to include it.
    pub fn push(&mut self, pt: Point) {
        if self.points.is_empty() {
            self.bbox = Rect::from_points(pt, pt);
        } else {
            if pt.x < self.bbox.x0 {
                self.bbox.x0 = pt.x;
            }
            if pt.y < self.bbox.y0 {
                self.bbox.y0 = pt.y;
            }
            if pt.x > self.bbox.x1 {
                self.bbox.x1 = pt.x;
            }
            if pt.y > self.bbox.y1 {
                self.bbox.y1 = pt.y;
            }
        }
        self.points.push(pt);
    }

    /// Appends a point given in integer file coordinates.
    pub fn push_file_coords(&mut self, x: i32, y: i32) {
        self.push(Point::new(f64::from(x), f64::from(y)));
    }

    /// The points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box `(left, top, right, bottom)` of all points, or `None` for
    /// an empty path.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        if self.points.is_empty() {
            None
        } else {
            Some(self.bbox)
        }
    }

    /// Applies `matrix` to every point in place.
    ///
    /// The bounding box is rebuilt through the same incremental update used by
    /// [`Path::push`], so it stays exact for any transform, including ones
    /// that reflect or rotate.
    pub fn transform(&mut self, matrix: &Matrix) {
        let mut points = core::mem::take(&mut self.points);
        for pt in &mut points {
            *pt = matrix.apply_point(*pt);
        }
        self.bbox = Rect::ZERO;
        self.points.reserve(points.len());
        for pt in points {
            self.push(pt);
        }
    }

    /// Returns a transformed copy of this path.
    #[must_use]
    pub fn transformed(&self, matrix: &Matrix) -> Self {
        let mut out = Self::with_capacity(self.points.len());
        for pt in &self.points {
            out.push(matrix.apply_point(*pt));
        }
        out
    }

    /// Emits this path into `sink`, clipped to `canvas` and decimated.
    ///
    /// The walk visits points in order:
    /// - Points outside `canvas` emit nothing. The next in-canvas point
    ///   continues the same subpath, so a segment may jump across the
    ///   excluded region.
    /// - The first in-canvas point starts the subpath with `move_to`.
    /// - A later in-canvas point is emitted with `line_to` only when its
    ///   Manhattan distance to the last emitted point is at least `min_step`.
    /// - The final point of the sequence is always emitted when it lies in
    ///   `canvas` and a subpath has been started.
    ///
    /// Paths with fewer than two points emit nothing.
    pub fn draw(&self, canvas: Rect, min_step: f64, sink: &mut impl DrawSink) {
        let Some((last, body)) = self.points.split_last() else {
            return;
        };
        if body.is_empty() {
            return;
        }

        let mut emitted: Option<Point> = None;
        for &pt in body {
            if !canvas.contains(pt) {
                continue;
            }
            match emitted {
                None => {
                    sink.move_to(pt);
                    emitted = Some(pt);
                }
                Some(prev) => {
                    if (pt.x - prev.x).abs() + (pt.y - prev.y).abs() >= min_step {
                        sink.line_to(pt);
                        emitted = Some(pt);
                    }
                }
            }
        }

        if emitted.is_some() && canvas.contains(*last) {
            sink.line_to(*last);
        }
    }
}

impl FromIterator<Point> for Path {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut path = Self::with_capacity(iter.size_hint().0);
        for pt in iter {
            path.push(pt);
        }
        path
    }
}
