// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark View: an interactive viewport over a Waymark dataset.
//!
//! [`Viewport`] is the surface a UI layer talks to. It translates discrete
//! pan, zoom and reset requests into view-transform updates on a
//! [`GeometryStore`], and reloads through a single-flight
//! [`LoadCoordinator`] that decodes on a worker thread.
//!
//! - Pan and zoom are synchronous: the view matrix and the view-space copy of
//!   the geometry change together, and the raster is moved to match.
//! - Reloads are asynchronous: [`Viewport::request_reload`] starts a decode
//!   (or is dropped if one is running), and [`Viewport::poll`] or
//!   [`Viewport::wait`] installs the result and rebuilds the raster.
//! - A failed load leaves the store and raster as they were.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use waymark_format::RecordWriter;
//! use waymark_view::{LoadEvent, MemorySource, ViewConfig, Viewport};
//!
//! let mut writer = RecordWriter::new(Vec::new());
//! writer.write_polyline(-1, 1030, &[(0, 0), (1000, 500)]).unwrap();
//! let source = MemorySource::new().with("malta", writer.finish().unwrap());
//!
//! let mut view = Viewport::new(source, Rect::new(0.0, 0.0, 200.0, 100.0), ViewConfig::default());
//! view.load_dataset("malta").unwrap();
//! assert!(matches!(view.wait(), Some(LoadEvent::Installed { elements: 1, full: true })));
//!
//! view.zoom_by(2.0, Point::new(100.0, 50.0));
//! view.request_reload().unwrap();
//! view.wait();
//! assert!(view.current_raster().is_some());
//! ```

mod config;
mod coordinator;
mod error;
mod source;
mod store;
mod viewport;

pub use config::ViewConfig;
pub use coordinator::{LoadCoordinator, LoadDispatch, LoadOutcome, LoadRequest};
pub use error::ViewError;
pub use source::{DatasetSource, DirectorySource, MemorySource};
pub use store::GeometryStore;
pub use viewport::{LoadEvent, Viewport};

pub use waymark_raster::{RasterSettings, RasterState};
