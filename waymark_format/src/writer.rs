// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};

use crate::RecordHeader;

/// Encoder producing the record stream read by [`crate::RecordDecoder`].
///
/// Header bounding boxes are computed from the points written.
#[derive(Debug)]
pub struct RecordWriter<W> {
    inner: W,
    records: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self { inner, records: 0 }
    }

    /// Number of records written.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records
    }

    /// Writes a polyline record. `level` must be negative.
    pub fn write_polyline(
        &mut self,
        level: i8,
        type_code: i16,
        points: &[(i32, i32)],
    ) -> io::Result<()> {
        if level >= 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "polyline records need a negative level",
            ));
        }
        let mut payload = Vec::with_capacity(points.len() * 8);
        write_pairs(&mut payload, points)?;
        self.write_record(level, type_code, bbox(points.iter()), &payload)
    }

    /// Writes a polygon record made of `rings`. `level` must be non-negative.
    pub fn write_polygon(
        &mut self,
        level: i8,
        type_code: i16,
        rings: &[&[(i32, i32)]],
    ) -> io::Result<()> {
        if level < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "polygon records need a non-negative level",
            ));
        }
        let mut payload = Vec::new();
        for ring in rings {
            let count = i32::try_from(ring.len())
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "ring too long"))?;
            payload.write_i32::<BigEndian>(count)?;
            write_pairs(&mut payload, ring)?;
        }
        let bounds = bbox(rings.iter().flat_map(|ring| ring.iter()));
        self.write_record(level, type_code, bounds, &payload)
    }

    /// Writes a header followed by `payload` verbatim.
    ///
    /// The header's `payload_len` is written as given, which lets tooling
    /// produce deliberately inconsistent records.
    pub fn write_raw(&mut self, header: &RecordHeader, payload: &[u8]) -> io::Result<()> {
        self.inner.write_all(&header.to_bytes())?;
        self.inner.write_all(payload)?;
        self.records += 1;
        Ok(())
    }

    /// Flushes and returns the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn write_record(
        &mut self,
        level: i8,
        type_code: i16,
        (min_x, min_y, max_x, max_y): (i32, i32, i32, i32),
        payload: &[u8],
    ) -> io::Result<()> {
        let payload_len = i32::try_from(payload.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "payload too large"))?;
        let header = RecordHeader {
            level,
            min_x,
            min_y,
            max_x,
            max_y,
            type_code,
            payload_len,
        };
        self.write_raw(&header, payload)
    }
}

fn write_pairs(out: &mut Vec<u8>, points: &[(i32, i32)]) -> io::Result<()> {
    for &(x, y) in points {
        out.write_i32::<BigEndian>(x)?;
        out.write_i32::<BigEndian>(y)?;
    }
    Ok(())
}

fn bbox<'a>(points: impl Iterator<Item = &'a (i32, i32)>) -> (i32, i32, i32, i32) {
    let mut acc: Option<(i32, i32, i32, i32)> = None;
    for &(x, y) in points {
        acc = Some(match acc {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    acc.unwrap_or_default()
}
