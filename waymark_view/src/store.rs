// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};
use waymark_geom::{MapElement, Matrix};

use crate::ViewError;

/// The loaded elements of one viewport and the transform that shows them.
///
/// Decoded elements are kept in file space and never modified. A derived
/// view-space copy is what gets rendered: [`GeometryStore::pan`] and
/// [`GeometryStore::zoom_by`] apply their delta to the view matrix and to
/// that copy in the same step, while installs and resets rebuild the copy
/// from the file-space originals with the full view matrix.
#[derive(Clone, Debug)]
pub struct GeometryStore {
    file: Vec<MapElement>,
    view: Vec<MapElement>,
    view_matrix: Matrix,
    zoom: f64,
}

impl Default for GeometryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryStore {
    /// Creates an empty store with the identity view.
    pub fn new() -> Self {
        Self {
            file: Vec::new(),
            view: Vec::new(),
            view_matrix: Matrix::IDENTITY,
            zoom: 1.0,
        }
    }

    /// Elements in view space, in decode order.
    pub fn elements(&self) -> &[MapElement] {
        &self.view
    }

    /// Elements as decoded, in file space.
    pub fn file_elements(&self) -> &[MapElement] {
        &self.file
    }

    /// Number of loaded elements.
    pub fn len(&self) -> usize {
        self.file.len()
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }

    /// Current file-to-view transform.
    pub fn view_matrix(&self) -> Matrix {
        self.view_matrix
    }

    /// Product of all zoom factors since the last fit.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Union of the file-space bounding boxes of all loaded elements.
    pub fn full_extent(&self) -> Option<Rect> {
        union_bounds(&self.file)
    }

    /// Union of the view-space bounding boxes of all loaded elements.
    pub fn view_bounds(&self) -> Option<Rect> {
        union_bounds(&self.view)
    }

    /// Replaces the elements and shows them through the current view matrix.
    pub fn install(&mut self, elements: Vec<MapElement>) {
        self.file = elements;
        self.rebuild_view();
    }

    /// Replaces the elements and fits their full extent into `viewport`.
    ///
    /// The zoom accumulator restarts at `1`.
    pub fn install_fitted(&mut self, elements: Vec<MapElement>, viewport: Rect) {
        self.file = elements;
        self.fit(viewport);
    }

    /// Composes `delta` onto the view (`view = delta ∘ view`) and applies it
    /// to every view-space element.
    pub fn apply_delta(&mut self, delta: Matrix) {
        self.view_matrix = delta.compose(self.view_matrix);
        for element in &mut self.view {
            element.geometry.transform(&delta);
        }
    }

    /// Translates the view by `(dx, dy)`.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.apply_delta(Matrix::translate(dx, dy));
    }

    /// Scales the view uniformly by `factor` about `anchor` (view space).
    pub fn zoom_by(&mut self, factor: f64, anchor: Point) {
        let delta = Matrix::translate(anchor.x, anchor.y)
            .compose(Matrix::scale(factor, factor))
            .compose(Matrix::translate(-anchor.x, -anchor.y));
        self.apply_delta(delta);
        self.zoom *= factor;
    }

    /// Refits the full extent into `viewport`.
    ///
    /// Fails with [`ViewError::OperationUnavailable`] and changes nothing
    /// when the current view matrix cannot be inverted.
    pub fn reset(&mut self, viewport: Rect) -> Result<(), ViewError> {
        self.view_matrix
            .invert()
            .ok_or(ViewError::OperationUnavailable { operation: "reset" })?;
        self.fit(viewport);
        Ok(())
    }

    /// Maps `viewport` grown by `margin` back into file space.
    ///
    /// This is the query rectangle of a bounded reload.
    pub fn load_bounds(&self, viewport: Rect, margin: f64) -> Result<Rect, ViewError> {
        let undo = self
            .view_matrix
            .invert()
            .ok_or(ViewError::OperationUnavailable {
                operation: "reload",
            })?;
        Ok(undo.apply_rect(viewport.abs().inflate(margin, margin)))
    }

    fn fit(&mut self, viewport: Rect) {
        // An empty store keeps its transform; there is nothing to fit.
        if let Some(extent) = self.full_extent() {
            self.view_matrix = Matrix::zoom_to_fit(extent, viewport);
        }
        self.zoom = 1.0;
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        let matrix = self.view_matrix;
        self.view.clear();
        self.view
            .extend(self.file.iter().map(|element| element.transformed(&matrix)));
    }
}

fn union_bounds(elements: &[MapElement]) -> Option<Rect> {
    elements
        .iter()
        .filter_map(MapElement::bounds)
        .reduce(|acc, bounds| acc.union(bounds))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};
    use waymark_geom::{MapElement, Matrix, Path};

    use super::GeometryStore;
    use crate::ViewError;

    fn element(points: &[(f64, f64)]) -> MapElement {
        let path: Path = points.iter().copied().map(Point::from).collect();
        MapElement::new(-1, 1030, path)
    }

    fn loaded() -> GeometryStore {
        let mut store = GeometryStore::new();
        store.install(vec![
            element(&[(0.0, 0.0), (100.0, 50.0)]),
            element(&[(-20.0, 10.0), (30.0, 80.0)]),
        ]);
        store
    }

    #[test]
    fn full_extent_unions_file_bounds() {
        let store = loaded();
        assert_eq!(store.full_extent(), Some(Rect::new(-20.0, 0.0, 100.0, 80.0)));
        assert_eq!(GeometryStore::new().full_extent(), None);
    }

    #[test]
    fn pan_moves_view_copy_but_not_file_elements() {
        let mut store = loaded();
        store.pan(10.0, -5.0);
        assert_eq!(store.view_bounds(), Some(Rect::new(-10.0, -5.0, 110.0, 75.0)));
        assert_eq!(store.full_extent(), Some(Rect::new(-20.0, 0.0, 100.0, 80.0)));
        assert_eq!(store.view_matrix(), Matrix::translate(10.0, -5.0));
    }

    #[test]
    fn zoom_accumulates_factor() {
        let mut store = loaded();
        store.zoom_by(2.0, Point::ZERO);
        store.zoom_by(1.5, Point::new(3.0, 3.0));
        assert_eq!(store.zoom(), 3.0);
    }

    #[test]
    fn install_applies_current_view() {
        let mut store = loaded();
        store.pan(5.0, 5.0);
        store.install(vec![element(&[(0.0, 0.0), (1.0, 1.0)])]);
        assert_eq!(store.view_bounds(), Some(Rect::new(5.0, 5.0, 6.0, 6.0)));
    }

    #[test]
    fn reset_fails_on_singular_view_and_keeps_state() {
        let mut store = loaded();
        store.zoom_by(0.0, Point::new(10.0, 10.0));
        let before = store.clone();
        let err = store.reset(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap_err();
        assert!(matches!(err, ViewError::OperationUnavailable { operation: "reset" }));
        assert_eq!(store.view_matrix(), before.view_matrix());
        assert_eq!(store.view_bounds(), before.view_bounds());
        assert_eq!(store.zoom(), 0.0);
    }

    #[test]
    fn load_bounds_maps_viewport_to_file_space() {
        let mut store = loaded();
        store.apply_delta(Matrix::scale(2.0, 2.0));
        let bounds = store
            .load_bounds(Rect::new(0.0, 0.0, 100.0, 100.0), 10.0)
            .unwrap();
        assert_eq!(bounds, Rect::new(-5.0, -5.0, 55.0, 55.0));
    }
}
