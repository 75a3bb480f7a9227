// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use byteorder::{BigEndian, ByteOrder};
use kurbo::Rect;
use waymark_geom::GeometryKind;

/// Size of the fixed record header in bytes.
pub const HEADER_LEN: usize = 23;

/// Fixed-size header preceding every record payload.
///
/// | offset | size | field |
/// |---|---|---|
/// | 0 | 1 | `level` (i8) |
/// | 1 | 4 | `min_x` (i32 BE) |
/// | 5 | 4 | `min_y` (i32 BE) |
/// | 9 | 4 | `max_x` (i32 BE) |
/// | 13 | 4 | `max_y` (i32 BE) |
/// | 17 | 2 | `type_code` (i16 BE) |
/// | 19 | 4 | `payload_len` (i32 BE) |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    /// Detail level; negative for polylines, non-negative for polygons.
    pub level: i8,
    /// Bounding box minimum X in file space.
    pub min_x: i32,
    /// Bounding box minimum Y in file space.
    pub min_y: i32,
    /// Bounding box maximum X in file space.
    pub max_x: i32,
    /// Bounding box maximum Y in file space.
    pub max_y: i32,
    /// Feature type code.
    pub type_code: i16,
    /// Declared payload size in bytes.
    pub payload_len: i32,
}

impl RecordHeader {
    /// Parses a header from its raw bytes.
    #[must_use]
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Self {
        Self {
            level: i8::from_be_bytes([bytes[0]]),
            min_x: BigEndian::read_i32(&bytes[1..5]),
            min_y: BigEndian::read_i32(&bytes[5..9]),
            max_x: BigEndian::read_i32(&bytes[9..13]),
            max_y: BigEndian::read_i32(&bytes[13..17]),
            type_code: BigEndian::read_i16(&bytes[17..19]),
            payload_len: BigEndian::read_i32(&bytes[19..23]),
        }
    }

    /// Serializes the header into its raw bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0_u8; HEADER_LEN];
        out[0] = self.level.to_be_bytes()[0];
        BigEndian::write_i32(&mut out[1..5], self.min_x);
        BigEndian::write_i32(&mut out[5..9], self.min_y);
        BigEndian::write_i32(&mut out[9..13], self.max_x);
        BigEndian::write_i32(&mut out[13..17], self.max_y);
        BigEndian::write_i16(&mut out[17..19], self.type_code);
        BigEndian::write_i32(&mut out[19..23], self.payload_len);
        out
    }

    /// Geometry kind selected by the level sign.
    #[must_use]
    pub fn kind(&self) -> GeometryKind {
        GeometryKind::from_level(self.level)
    }

    /// Header bounding box in file space, normalized so that `x0 <= x1` and `y0 <= y1`.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(
            f64::from(self.min_x),
            f64::from(self.min_y),
            f64::from(self.max_x),
            f64::from(self.max_y),
        )
        .abs()
    }

    /// Whether the header bounding box touches `query`.
    ///
    /// Edges count as touching, so zero-width records (vertical or horizontal
    /// lines) still intersect a query that covers them.
    #[must_use]
    pub fn intersects(&self, query: Rect) -> bool {
        let own = self.bounds();
        let query = query.abs();
        own.x0 <= query.x1 && query.x0 <= own.x1 && own.y0 <= query.y1 && query.y0 <= own.y1
    }
}
