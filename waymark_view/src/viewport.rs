// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use kurbo::{Point, Rect};
use tracing::{info, warn};
use waymark_geom::Matrix;
use waymark_raster::{RasterState, Renderer};

use crate::{
    DatasetSource, GeometryStore, LoadCoordinator, LoadDispatch, LoadOutcome, LoadRequest,
    ViewConfig, ViewError,
};

/// What happened when a load result was collected.
#[derive(Debug)]
pub enum LoadEvent {
    /// The decoded elements replaced the store and the raster was rebuilt.
    Installed {
        /// Number of elements now loaded.
        elements: usize,
        /// Whether this was an unbounded load that refit the view.
        full: bool,
    },
    /// The load failed; the store and raster are unchanged.
    ///
    /// A failed full load also abandons the dataset switch that started it.
    Failed(ViewError),
    /// The result belonged to a dataset that is no longer selected.
    Discarded,
}

/// An interactive map view: the context object behind every view operation.
///
/// A `Viewport` owns the loaded geometry, the view transform, the raster, and
/// the background loader. All of its methods run on the thread that owns it;
/// only decoding happens elsewhere, and decode results are applied when
/// [`Viewport::poll`] or [`Viewport::wait`] is called.
///
/// View space is the viewport's own coordinate system: `rect` is the visible
/// area, and a full load fits the dataset into it.
#[derive(Debug)]
pub struct Viewport {
    config: ViewConfig,
    rect: Rect,
    store: GeometryStore,
    loader: LoadCoordinator,
    renderer: Renderer,
    raster: Option<RasterState>,
    dataset: Option<String>,
    pending: Option<String>,
}

impl Viewport {
    /// Creates an empty viewport showing `rect` and reading from `source`.
    pub fn new(source: impl DatasetSource + 'static, rect: Rect, config: ViewConfig) -> Self {
        Self::with_shared_source(Arc::new(source), rect, config)
    }

    /// Like [`Viewport::new`], for a source shared with other owners.
    pub fn with_shared_source(
        source: Arc<dyn DatasetSource>,
        rect: Rect,
        config: ViewConfig,
    ) -> Self {
        Self {
            loader: LoadCoordinator::new(source, config.lod.clone()),
            renderer: Renderer::new(config.raster),
            config,
            rect,
            store: GeometryStore::new(),
            raster: None,
            dataset: None,
            pending: None,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The visible area in view space.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Changes the visible area; takes effect on the next reload.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// The loaded geometry and view transform.
    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    /// Current file-to-view transform.
    pub fn view_matrix(&self) -> Matrix {
        self.store.view_matrix()
    }

    /// Product of zoom factors since the last fit.
    pub fn zoom(&self) -> f64 {
        self.store.zoom()
    }

    /// File-space units per view-space unit, if the view is invertible.
    pub fn effective_scale(&self) -> Option<f64> {
        self.store.view_matrix().effective_scale()
    }

    /// File-space union of all loaded element bounds.
    pub fn full_extent(&self) -> Option<Rect> {
        self.store.full_extent()
    }

    /// Dataset whose elements are currently loaded.
    pub fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    /// Dataset selected by [`Viewport::load_dataset`] whose full load has not
    /// been installed yet.
    pub fn pending_dataset(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Whether a load is in flight or waiting to be collected.
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// The background loader.
    pub fn loader(&self) -> &LoadCoordinator {
        &self.loader
    }

    /// The last rebuilt raster, if any load has completed.
    pub fn current_raster(&self) -> Option<&RasterState> {
        self.raster.as_ref()
    }

    /// Selects `name` and requests an unbounded load of it.
    ///
    /// The currently displayed data stays until the new load is installed,
    /// and [`Viewport::dataset`] only switches to `name` at that point. If
    /// another load is in flight the request is dropped, but the full load
    /// stays pending for the next [`Viewport::request_reload`]. If the full
    /// load fails, the switch is abandoned and the previous dataset stays.
    pub fn load_dataset(&mut self, name: &str) -> Result<LoadDispatch, ViewError> {
        info!(dataset = name, "switching dataset");
        self.pending = Some(name.to_owned());
        self.request_reload()
    }

    /// Requests a reload.
    ///
    /// Loads the whole pending dataset after [`Viewport::load_dataset`], and
    /// otherwise the viewport plus [`ViewConfig::load_margin`] of the loaded
    /// dataset, mapped back into file space. Dropped if a load is already in
    /// flight.
    pub fn request_reload(&mut self) -> Result<LoadDispatch, ViewError> {
        let request = if let Some(dataset) = &self.pending {
            LoadRequest {
                dataset: dataset.clone(),
                bounds: None,
            }
        } else {
            let dataset = self.dataset.clone().ok_or(ViewError::NoDataset)?;
            LoadRequest {
                dataset,
                bounds: Some(self.store.load_bounds(self.rect, self.config.load_margin)?),
            }
        };
        self.loader.request(request)
    }

    /// Translates the view by `(dx, dy)`.
    ///
    /// Geometry and raster move together; no reload is triggered.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.store.pan(dx, dy);
        if let Some(raster) = &mut self.raster {
            raster.reposition(dx, dy);
        }
    }

    /// Zooms by `factor` about `anchor` (view space).
    ///
    /// The caller should follow with [`Viewport::request_reload`] once the
    /// gesture is over so the level of detail matches the new scale.
    pub fn zoom_by(&mut self, factor: f64, anchor: Point) {
        self.store.zoom_by(factor, anchor);
        if let Some(raster) = &mut self.raster {
            raster.scale_about(factor, anchor);
        }
    }

    /// Zooms in about the viewport center and requests a reload.
    pub fn zoom_in(&mut self) -> Result<LoadDispatch, ViewError> {
        self.zoom_by(self.config.zoom_in_factor, self.rect.center());
        self.request_reload()
    }

    /// Zooms out about the viewport center and requests a reload.
    pub fn zoom_out(&mut self) -> Result<LoadDispatch, ViewError> {
        self.zoom_by(self.config.zoom_out_factor, self.rect.center());
        self.request_reload()
    }

    /// Fits everything loaded into the viewport and redraws it.
    ///
    /// Fails with [`ViewError::OperationUnavailable`] when the view transform
    /// is singular, or with [`ViewError::Raster`] when the raster cannot be
    /// built; nothing changes in either case. The caller should follow with
    /// [`Viewport::request_reload`].
    pub fn reset_to_full_extent(&mut self) -> Result<(), ViewError> {
        let mut store = self.store.clone();
        store.reset(self.rect)?;
        let raster = self.renderer.rebuild(self.rect, store.elements())?;
        self.store = store;
        self.raster = Some(raster);
        Ok(())
    }

    /// Moves the raster during a drag without touching geometry.
    pub fn move_raster(&mut self, dx: f64, dy: f64) {
        if let Some(raster) = &mut self.raster {
            raster.reposition(dx, dy);
        }
    }

    /// Ends a drag of `(dx, dy)` that was previewed with [`Viewport::move_raster`].
    ///
    /// Pans the geometry by the same amount and requests a reload.
    pub fn end_drag(&mut self, dx: f64, dy: f64) -> Result<LoadDispatch, ViewError> {
        self.store.pan(dx, dy);
        self.request_reload()
    }

    /// Shows the raster scaled by the gesture's total `factor` about `anchor`.
    pub fn preview_zoom(&mut self, factor: f64, anchor: Point) {
        if let Some(raster) = &mut self.raster {
            raster.preview_zoom(factor, anchor);
        }
    }

    /// Ends a zoom gesture: applies [`Viewport::zoom_by`] and requests a reload.
    pub fn end_zoom(&mut self, factor: f64, anchor: Point) -> Result<LoadDispatch, ViewError> {
        self.zoom_by(factor, anchor);
        self.request_reload()
    }

    /// Applies a finished load if one is ready, without blocking.
    pub fn poll(&mut self) -> Option<LoadEvent> {
        let outcome = self.loader.try_complete()?;
        Some(self.apply(outcome))
    }

    /// Blocks for the in-flight load, if any, and applies it.
    pub fn wait(&mut self) -> Option<LoadEvent> {
        let outcome = self.loader.wait()?;
        Some(self.apply(outcome))
    }

    fn apply(&mut self, outcome: LoadOutcome) -> LoadEvent {
        let LoadOutcome { request, result } = outcome;
        let full = request.is_full();
        let expected = match &self.pending {
            Some(pending) if full => Some(pending.as_str()),
            Some(_) => None,
            None => self.dataset.as_deref(),
        };
        if expected != Some(request.dataset.as_str()) {
            warn!(dataset = %request.dataset, "discarding load for a dataset no longer shown");
            return LoadEvent::Discarded;
        }
        let elements = match result {
            Ok(elements) => elements,
            Err(err) => {
                warn!(dataset = %request.dataset, error = %err, "load failed");
                if full {
                    self.pending = None;
                }
                return LoadEvent::Failed(err);
            }
        };

        if full {
            self.store.install_fitted(elements, self.rect);
            self.dataset = self.pending.take();
        } else {
            self.store.install(elements);
        }
        info!(
            dataset = %request.dataset,
            elements = self.store.len(),
            full,
            "load installed"
        );

        match self.renderer.rebuild(self.rect, self.store.elements()) {
            Ok(raster) => self.raster = Some(raster),
            Err(err) => {
                warn!(error = %err, "raster rebuild failed");
                return LoadEvent::Failed(err.into());
            }
        }
        LoadEvent::Installed {
            elements: self.store.len(),
            full,
        }
    }
}
