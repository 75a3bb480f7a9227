// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Format: the binary map record stream.
//!
//! A dataset is a plain sequence of records with no index or footer. Each
//! record is a fixed 23-byte big-endian [`RecordHeader`] followed by a
//! variable payload:
//! - polylines (negative level): a flat list of `(x, y)` `i32` pairs;
//! - polygons (non-negative level): rings, each an `i32` point count followed
//!   by that many pairs. Rings are flattened into one path per record.
//!
//! [`RecordDecoder`] streams admitted records as
//! [`waymark_geom::MapElement`]s in file order. Admission is decided by a
//! [`RecordFilter`]: the level must fall in the [`LodBucket`] chosen by
//! [`LodPolicy`] from the query width, and the header bounding box must touch
//! the query rectangle.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use waymark_format::{LodPolicy, RecordWriter, decode_records};
//!
//! let mut writer = RecordWriter::new(Vec::new());
//! writer.write_polyline(-1, 1030, &[(0, 0), (100, 0)]).unwrap();
//! writer.write_polygon(1, 2000, &[&[(0, 0), (10, 0), (10, 10)]]).unwrap();
//! let bytes = writer.finish().unwrap();
//!
//! let all = decode_records(bytes.as_slice(), None, &LodPolicy::default()).unwrap();
//! assert_eq!(all.len(), 2);
//!
//! let query = Rect::new(50.0, -5.0, 60.0, 5.0);
//! let near = decode_records(bytes.as_slice(), Some(query), &LodPolicy::default()).unwrap();
//! assert_eq!(near.len(), 1);
//! assert_eq!(near[0].type_code, 1030);
//! ```

mod decoder;
mod error;
mod header;
mod lod;
mod writer;

pub use decoder::{RecordDecoder, decode_records};
pub use error::{DecodeError, FormatError};
pub use header::{HEADER_LEN, RecordHeader};
pub use lod::{LodBucket, LodPolicy, RecordFilter};
pub use writer::RecordWriter;
