// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{error, fmt};

use waymark_format::DecodeError;
use waymark_raster::RasterError;

/// Errors reported by [`crate::Viewport`] operations and load completions.
#[derive(Debug)]
pub enum ViewError {
    /// The named dataset could not be found by the [`crate::DatasetSource`].
    ResourceNotFound {
        /// Dataset name as requested.
        name: String,
    },
    /// Reading or decoding the dataset failed; nothing was installed.
    Decode(DecodeError),
    /// The raster could not be rebuilt.
    Raster(RasterError),
    /// A matrix inversion failed because the view transform is singular.
    ///
    /// The operation was skipped and prior state is preserved.
    OperationUnavailable {
        /// Name of the skipped operation.
        operation: &'static str,
    },
    /// A reload was requested before any dataset was selected.
    NoDataset,
    /// The decode worker could not be started or exited without a result.
    WorkerLost,
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceNotFound { name } => write!(f, "dataset `{name}` not found"),
            Self::Decode(err) => write!(f, "failed to decode dataset: {err}"),
            Self::Raster(err) => write!(f, "failed to rebuild raster: {err}"),
            Self::OperationUnavailable { operation } => {
                write!(f, "{operation} unavailable: view transform is not invertible")
            }
            Self::NoDataset => f.write_str("no dataset selected"),
            Self::WorkerLost => f.write_str("decode worker exited without a result"),
        }
    }
}

impl error::Error for ViewError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Raster(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DecodeError> for ViewError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<RasterError> for ViewError {
    fn from(err: RasterError) -> Self {
        Self::Raster(err)
    }
}
