// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use waymark_format::LodPolicy;
use waymark_raster::RasterSettings;

/// Tunables for a [`crate::Viewport`].
#[derive(Clone, Debug)]
pub struct ViewConfig {
    /// View-space margin added around the viewport before mapping a bounded
    /// reload back into file space.
    pub load_margin: f64,
    /// Raster sizing, clipping and stroke settings.
    pub raster: RasterSettings,
    /// Level-of-detail thresholds used by bounded and full loads.
    pub lod: LodPolicy,
    /// Factor applied by [`crate::Viewport::zoom_in`].
    pub zoom_in_factor: f64,
    /// Factor applied by [`crate::Viewport::zoom_out`].
    pub zoom_out_factor: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            load_margin: 400.0,
            raster: RasterSettings::default(),
            lod: LodPolicy::default(),
            zoom_in_factor: 1.5,
            zoom_out_factor: 0.5,
        }
    }
}
