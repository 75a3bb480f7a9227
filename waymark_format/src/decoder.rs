// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io::{self, Read};

use byteorder::{BigEndian, ByteOrder};
use kurbo::Rect;
use tracing::{debug, trace};
use waymark_geom::{GeometryKind, MapElement, Path};

use crate::{DecodeError, FormatError, HEADER_LEN, LodPolicy, RecordFilter, RecordHeader};

const POINT_LEN: usize = 8;
const RING_COUNT_LEN: usize = 4;

/// Streaming decoder over a sequence of map records.
///
/// Yields, in file order, the [`MapElement`]s whose headers pass the
/// [`RecordFilter`]. Element geometry is in file space.
///
/// A trailing fragment shorter than a full header ends the stream cleanly.
/// A payload that runs past the end of the stream, or a ring that runs past
/// the end of its payload, yields a [`FormatError`] and ends iteration.
#[derive(Debug)]
pub struct RecordDecoder<R> {
    reader: R,
    filter: RecordFilter,
    record: usize,
    done: bool,
}

impl<R: Read> RecordDecoder<R> {
    /// Creates a decoder reading from `reader` and keeping only records
    /// admitted by `filter`.
    pub fn new(reader: R, filter: RecordFilter) -> Self {
        Self {
            reader,
            filter,
            record: 0,
            done: false,
        }
    }

    /// The filter in effect.
    #[must_use]
    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// Number of records read so far, admitted or not.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.record
    }

    fn next_element(&mut self) -> Result<Option<MapElement>, DecodeError> {
        loop {
            let Some(header) = self.read_header()? else {
                return Ok(None);
            };
            let index = self.record;
            self.record += 1;

            let len = usize::try_from(header.payload_len).map_err(|_| {
                FormatError::NegativeLength {
                    record: index,
                    field: "payload size",
                    value: header.payload_len,
                }
            })?;

            if !self.filter.admits(&header) {
                self.skip_payload(index, len)?;
                trace!(record = index, level = header.level, "record filtered out");
                continue;
            }

            let payload = self.read_payload(index, len)?;
            let geometry = match header.kind() {
                GeometryKind::Polyline => decode_polyline(index, &payload)?,
                GeometryKind::Polygon => decode_polygon(index, &payload)?,
            };
            if geometry.is_empty() {
                trace!(record = index, "record has no points");
                continue;
            }
            return Ok(Some(MapElement::new(
                header.level,
                header.type_code,
                geometry,
            )));
        }
    }

    /// Reads the next header, or `None` when fewer than [`HEADER_LEN`] bytes remain.
    fn read_header(&mut self) -> io::Result<Option<RecordHeader>> {
        let mut buf = [0_u8; HEADER_LEN];
        let mut filled = 0;
        while filled < HEADER_LEN {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        if filled < HEADER_LEN {
            if filled > 0 {
                trace!(bytes = filled, "ignoring truncated trailing header");
            }
            return Ok(None);
        }
        Ok(Some(RecordHeader::parse(&buf)))
    }

    fn read_payload(&mut self, record: usize, len: usize) -> Result<Vec<u8>, DecodeError> {
        let mut payload = Vec::new();
        (&mut self.reader)
            .take(len as u64)
            .read_to_end(&mut payload)?;
        if payload.len() < len {
            return Err(FormatError::PayloadOverrun {
                record,
                declared: len,
                available: payload.len(),
            }
            .into());
        }
        Ok(payload)
    }

    fn skip_payload(&mut self, record: usize, len: usize) -> Result<(), DecodeError> {
        let skipped = io::copy(&mut (&mut self.reader).take(len as u64), &mut io::sink())?;
        if skipped < len as u64 {
            return Err(FormatError::PayloadOverrun {
                record,
                declared: len,
                available: usize::try_from(skipped).unwrap_or(usize::MAX),
            }
            .into());
        }
        Ok(())
    }
}

impl<R: Read> Iterator for RecordDecoder<R> {
    type Item = Result<MapElement, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_element() {
            Ok(Some(element)) => Some(Ok(element)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Decodes every admitted record of `reader` into file-space elements.
///
/// The LOD bucket comes from `policy` and the width of `bounds`; `None`
/// bounds load the whole stream at the coarsest bucket. On error nothing is
/// returned, even if earlier records decoded successfully.
pub fn decode_records<R: Read>(
    reader: R,
    bounds: Option<Rect>,
    policy: &LodPolicy,
) -> Result<Vec<MapElement>, DecodeError> {
    let filter = RecordFilter::new(bounds, policy);
    let mut decoder = RecordDecoder::new(reader, filter);
    let elements = decoder.by_ref().collect::<Result<Vec<_>, _>>()?;
    debug!(
        bucket = filter.bucket().0,
        ?bounds,
        records = decoder.records_read(),
        elements = elements.len(),
        "decoded map records"
    );
    Ok(elements)
}

/// Flat sequence of big-endian `(x, y)` pairs, one subpath.
fn decode_polyline(record: usize, payload: &[u8]) -> Result<Path, FormatError> {
    if payload.len() % POINT_LEN != 0 {
        return Err(FormatError::MisalignedPayload {
            record,
            len: payload.len(),
        });
    }
    let mut path = Path::with_capacity(payload.len() / POINT_LEN);
    push_points(&mut path, payload);
    Ok(path)
}

/// Sequence of rings, each a big-endian point count followed by that many
/// pairs. All rings are flattened into one path.
fn decode_polygon(record: usize, payload: &[u8]) -> Result<Path, FormatError> {
    let mut path = Path::new();
    let mut rest = payload;
    let mut ring = 0;
    while !rest.is_empty() {
        if rest.len() < RING_COUNT_LEN {
            return Err(FormatError::MisalignedPayload {
                record,
                len: payload.len(),
            });
        }
        let count = BigEndian::read_i32(&rest[..RING_COUNT_LEN]);
        rest = &rest[RING_COUNT_LEN..];
        let points = usize::try_from(count).map_err(|_| FormatError::NegativeLength {
            record,
            field: "ring point count",
            value: count,
        })?;
        let ring_len = points
            .checked_mul(POINT_LEN)
            .filter(|&n| n <= rest.len())
            .ok_or(FormatError::RingOverrun {
                record,
                ring,
                points,
                remaining: rest.len(),
            })?;
        let (ring_bytes, tail) = rest.split_at(ring_len);
        push_points(&mut path, ring_bytes);
        rest = tail;
        ring += 1;
    }
    Ok(path)
}

fn push_points(path: &mut Path, bytes: &[u8]) {
    for pair in bytes.chunks_exact(POINT_LEN) {
        let x = BigEndian::read_i32(&pair[..4]);
        let y = BigEndian::read_i32(&pair[4..]);
        path.push_file_coords(x, y);
    }
}

#[cfg(test)]
mod tests {
    use byteorder::{BigEndian, WriteBytesExt};
    use kurbo::Point;

    use super::{decode_polygon, decode_polyline};
    use crate::FormatError;

    fn pairs(points: &[(i32, i32)]) -> Vec<u8> {
        let mut out = Vec::new();
        for &(x, y) in points {
            out.write_i32::<BigEndian>(x).unwrap();
            out.write_i32::<BigEndian>(y).unwrap();
        }
        out
    }

    #[test]
    fn polyline_reads_sequential_pairs() {
        let path = decode_polyline(0, &pairs(&[(1, 2), (-3, 4), (5, -6)])).unwrap();
        assert_eq!(
            path.points(),
            [
                Point::new(1.0, 2.0),
                Point::new(-3.0, 4.0),
                Point::new(5.0, -6.0)
            ]
        );
    }

    #[test]
    fn polyline_rejects_partial_pair() {
        let mut payload = pairs(&[(1, 2)]);
        payload.push(0);
        assert_eq!(
            decode_polyline(3, &payload),
            Err(FormatError::MisalignedPayload { record: 3, len: 9 })
        );
    }

    #[test]
    fn polygon_flattens_rings() {
        let mut payload = Vec::new();
        payload.write_i32::<BigEndian>(2).unwrap();
        payload.extend(pairs(&[(0, 0), (10, 0)]));
        payload.write_i32::<BigEndian>(1).unwrap();
        payload.extend(pairs(&[(5, 5)]));

        let path = decode_polygon(0, &payload).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.points()[2], Point::new(5.0, 5.0));
    }

    #[test]
    fn polygon_ring_count_past_payload_is_an_error() {
        let mut payload = Vec::new();
        payload.write_i32::<BigEndian>(3).unwrap();
        payload.extend(pairs(&[(0, 0), (10, 0)]));
        assert_eq!(
            decode_polygon(7, &payload),
            Err(FormatError::RingOverrun {
                record: 7,
                ring: 0,
                points: 3,
                remaining: 16,
            })
        );
    }

    #[test]
    fn polygon_negative_ring_count_is_an_error() {
        let mut payload = Vec::new();
        payload.write_i32::<BigEndian>(-1).unwrap();
        assert!(matches!(
            decode_polygon(0, &payload),
            Err(FormatError::NegativeLength { value: -1, .. })
        ));
    }
}
