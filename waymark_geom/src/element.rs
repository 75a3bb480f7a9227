// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use peniko::Color;

use crate::{Matrix, Path};

/// Whether a record's geometry is an open line or a set of rings.
///
/// The kind is encoded in the sign of the record's level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Open polyline (negative level).
    Polyline,
    /// Polygon ring set (non-negative level), flattened into one path.
    Polygon,
}

impl GeometryKind {
    /// Kind denoted by a record level.
    #[must_use]
    pub const fn from_level(level: i8) -> Self {
        if level < 0 {
            Self::Polyline
        } else {
            Self::Polygon
        }
    }
}

/// Stroke color bucket derived from a feature type code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrokeClass {
    /// Type codes above 8000.
    Gray,
    /// 1010, 1011, 1020, 1021.
    Slate,
    /// 1030, 1031.
    Red,
    /// 1040, 1041.
    Ochre,
    /// 1080.
    Orange,
    /// 2000 through 2999.
    Blue,
    /// Everything else.
    Black,
}

impl StrokeClass {
    /// Classifies a feature type code.
    #[must_use]
    pub const fn of(type_code: i16) -> Self {
        match type_code {
            8001.. => Self::Gray,
            1010 | 1011 | 1020 | 1021 => Self::Slate,
            1030 | 1031 => Self::Red,
            1040 | 1041 => Self::Ochre,
            1080 => Self::Orange,
            2000..=2999 => Self::Blue,
            _ => Self::Black,
        }
    }

    /// Stroke color for this class.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Gray => Color::from_rgb8(128, 128, 128),
            Self::Slate => Color::from_rgb8(114, 132, 201),
            Self::Red => Color::from_rgb8(255, 0, 0),
            Self::Ochre => Color::from_rgb8(196, 186, 36),
            Self::Orange => Color::from_rgb8(255, 128, 0),
            Self::Blue => Color::from_rgb8(0, 0, 255),
            Self::Black => Color::from_rgb8(0, 0, 0),
        }
    }
}

/// One decoded map feature: detail level, type code, and geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct MapElement {
    /// Detail level; the sign selects the [`GeometryKind`].
    pub level: i8,
    /// Feature type code, used only for stroke classification.
    pub type_code: i16,
    /// Geometry in whatever space the last applied transform produced.
    pub geometry: Path,
}

impl MapElement {
    /// Creates an element from its parts.
    #[must_use]
    pub fn new(level: i8, type_code: i16, geometry: Path) -> Self {
        Self {
            level,
            type_code,
            geometry,
        }
    }

    /// Geometry kind from the level sign.
    #[must_use]
    pub fn kind(&self) -> GeometryKind {
        GeometryKind::from_level(self.level)
    }

    /// Stroke class from the type code.
    #[must_use]
    pub fn stroke_class(&self) -> StrokeClass {
        StrokeClass::of(self.type_code)
    }

    /// Stroke color from the type code.
    #[must_use]
    pub fn color(&self) -> Color {
        self.stroke_class().color()
    }

    /// Bounding box of the geometry, if it has any points.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.geometry.bounds()
    }

    /// Returns a copy with `matrix` applied to the geometry.
    #[must_use]
    pub fn transformed(&self, matrix: &Matrix) -> Self {
        Self {
            level: self.level,
            type_code: self.type_code,
            geometry: self.geometry.transformed(matrix),
        }
    }
}
