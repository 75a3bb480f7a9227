// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{error, fmt};

/// Error returned when a raster cannot be allocated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RasterError {
    /// The viewport plus margin has no area.
    Empty,
    /// The viewport plus margin exceeds the largest supported image.
    TooLarge {
        /// Requested width in pixels.
        width: f64,
        /// Requested height in pixels.
        height: f64,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("raster area is empty"),
            Self::TooLarge { width, height } => write!(
                f,
                "raster of {width}x{height} pixels exceeds the {max}x{max} limit",
                max = u16::MAX
            ),
        }
    }
}

impl error::Error for RasterError {}
