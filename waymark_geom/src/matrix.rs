// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

/// 2D affine transform used to move geometry between file space and view space.
///
/// `Matrix` is an immutable value: every operation returns a new matrix. It is
/// a thin wrapper over [`kurbo::Affine`] that fixes the composition order used
/// throughout Waymark:
///
/// `outer.compose(inner)` is the transform that applies `inner` first and
/// `outer` second.
///
/// ```rust
/// use kurbo::Point;
/// use waymark_geom::Matrix;
///
/// let scale = Matrix::scale(2.0, 2.0);
/// let shift = Matrix::translate(10.0, 0.0);
///
/// // Scale first, then shift.
/// let m = shift.compose(scale);
/// assert_eq!(m.apply_point(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix(Affine);

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self(Affine::IDENTITY);

    /// Returns the identity transform.
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Translation by `(dx, dy)`.
    #[must_use]
    pub fn translate(dx: f64, dy: f64) -> Self {
        Self(Affine::translate(Vec2::new(dx, dy)))
    }

    /// Axis-aligned scale by `sx` horizontally and `sy` vertically.
    #[must_use]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self(Affine::scale_non_uniform(sx, sy))
    }

    /// Rotation about the origin by `degrees`.
    #[must_use]
    pub fn rotate(degrees: f64) -> Self {
        Self(Affine::rotate(degrees.to_radians()))
    }

    /// Rotation by `degrees` about the point `(x, y)`.
    ///
    /// Equivalent to `translate(x, y) ∘ rotate(degrees) ∘ translate(-x, -y)`.
    #[must_use]
    pub fn rotate_around(degrees: f64, x: f64, y: f64) -> Self {
        Self::translate(x, y)
            .compose(Self::rotate(degrees))
            .compose(Self::translate(-x, -y))
    }

    /// Reflection across the X axis (`y -> -y`).
    #[must_use]
    pub fn reflect_x() -> Self {
        Self(Affine::FLIP_Y)
    }

    /// Returns the transform that applies `inner` first and then `self`.
    #[must_use]
    pub fn compose(self, inner: Self) -> Self {
        Self(self.0 * inner.0)
    }

    /// Determinant of the linear part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    /// Returns the inverse transform, or `None` when the determinant is zero.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self(self.0.inverse()))
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn apply_point(&self, pt: Point) -> Point {
        self.0 * pt
    }

    /// Applies the transform to a rectangle and returns the bounding box of
    /// the transformed corners.
    ///
    /// For the axis-aligned transforms used by pan, zoom and fit this is the
    /// exact image of the rectangle.
    #[must_use]
    pub fn apply_rect(&self, rect: Rect) -> Rect {
        self.0.transform_rect_bbox(rect)
    }

    /// File-space units covered by one view-space unit.
    ///
    /// Derived by mapping a unit-height reference rectangle back through the
    /// inverse transform and reading its height. Returns `None` when the
    /// transform is not invertible.
    #[must_use]
    pub fn effective_scale(&self) -> Option<f64> {
        let inverse = self.invert()?;
        Some(inverse.apply_rect(Rect::new(0.0, 0.0, 0.0, 1.0)).height())
    }

    /// Transform that fits `content` (file space) centered into `viewport`
    /// (view space), preserving aspect ratio.
    ///
    /// The composite is
    /// `translate(viewport center) ∘ reflect_x ∘ scale(s, s) ∘ translate(-content center)`
    /// with `s = min(viewport.width / content.width, viewport.height / content.height)`.
    /// The reflection turns the file's upward Y axis into the downward Y axis
    /// of view space.
    ///
    /// A degenerate content rectangle (zero width and height) falls back to `s = 1`.
    #[must_use]
    pub fn zoom_to_fit(content: Rect, viewport: Rect) -> Self {
        let sx = viewport.width() / content.width();
        let sy = viewport.height() / content.height();
        let mut s = sx.min(sy);
        if !s.is_finite() || s <= 0.0 {
            s = 1.0;
        }
        let view_center = viewport.center();
        let content_center = content.center();
        Self::translate(view_center.x, view_center.y)
            .compose(Self::reflect_x())
            .compose(Self::scale(s, s))
            .compose(Self::translate(-content_center.x, -content_center.y))
    }

    /// The six affine coefficients `[a, b, c, d, e, f]` in kurbo order.
    #[must_use]
    pub fn coeffs(&self) -> [f64; 6] {
        self.0.as_coeffs()
    }

    /// Returns the underlying [`Affine`].
    #[must_use]
    pub fn to_affine(self) -> Affine {
        self.0
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Affine> for Matrix {
    fn from(affine: Affine) -> Self {
        Self(affine)
    }
}
