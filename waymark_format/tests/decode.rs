// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `waymark_format` decoding.
//!
//! These exercise whole record streams: level-of-detail and bounds filtering,
//! clean termination on a truncated trailing header, and all-or-nothing
//! failure on overrunning payloads.

use kurbo::{Point, Rect};
use waymark_format::{
    DecodeError, FormatError, LodBucket, LodPolicy, RecordDecoder, RecordFilter, RecordHeader,
    RecordWriter, decode_records,
};
use waymark_geom::{GeometryKind, StrokeClass};

fn red_polyline_header() -> RecordHeader {
    RecordHeader {
        level: -2,
        min_x: 0,
        min_y: 0,
        max_x: 100,
        max_y: 100,
        type_code: 1030,
        payload_len: 16,
    }
}

fn red_polyline_bytes() -> Vec<u8> {
    let mut bytes = red_polyline_header().to_bytes().to_vec();
    for v in [10_i32, 20, 90, 80] {
        bytes.extend_from_slice(&v.to_be_bytes());
    }
    bytes
}

const QUERY: Rect = Rect::new(-50.0, -50.0, 500.0, 500.0);

#[test]
fn crafted_polyline_at_finest_bucket() {
    let bytes = red_polyline_bytes();
    let filter = RecordFilter::with_bucket(Some(QUERY), LodBucket(4));
    let elements = RecordDecoder::new(bytes.as_slice(), filter)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(elements.len(), 1);
    let element = &elements[0];
    assert_eq!(element.kind(), GeometryKind::Polyline);
    assert_eq!(element.stroke_class(), StrokeClass::Red);
    assert_eq!(
        element.geometry.points(),
        [Point::new(10.0, 20.0), Point::new(90.0, 80.0)]
    );
}

#[test]
fn crafted_polyline_filtered_at_coarsest_bucket() {
    let bytes = red_polyline_bytes();
    let filter = RecordFilter::with_bucket(Some(QUERY), LodBucket(1));
    let elements = RecordDecoder::new(bytes.as_slice(), filter)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert!(elements.is_empty());
}

#[test]
fn narrow_query_selects_finest_bucket() {
    // A 550-unit wide query lands in bucket 4, which admits level -2.
    let bytes = red_polyline_bytes();
    let elements = decode_records(bytes.as_slice(), Some(QUERY), &LodPolicy::default()).unwrap();
    assert_eq!(elements.len(), 1);

    // An unbounded load only admits level -1 and 0..=1.
    let elements = decode_records(bytes.as_slice(), None, &LodPolicy::default()).unwrap();
    assert!(elements.is_empty());
}

#[test]
fn records_outside_query_are_skipped_but_stream_continues() {
    let mut writer = RecordWriter::new(Vec::new());
    writer.write_polyline(-1, 1, &[(0, 0), (10, 10)]).unwrap();
    writer
        .write_polyline(-1, 2, &[(10_000, 10_000), (10_010, 10_010)])
        .unwrap();
    writer.write_polyline(-1, 3, &[(5, 5), (6, 6)]).unwrap();
    let bytes = writer.finish().unwrap();

    let query = Rect::new(0.0, 0.0, 100.0, 100.0);
    let elements = decode_records(bytes.as_slice(), Some(query), &LodPolicy::default()).unwrap();
    let codes: Vec<i16> = elements.iter().map(|e| e.type_code).collect();
    assert_eq!(codes, [1, 3], "file order among admitted records");
}

#[test]
fn truncated_trailing_header_is_clean_end_of_stream() {
    let mut bytes = red_polyline_bytes();
    bytes.extend_from_slice(&[0xFF; 10]);
    let filter = RecordFilter::with_bucket(None, LodBucket(4));
    let elements = RecordDecoder::new(bytes.as_slice(), filter)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(elements.len(), 1);
}

#[test]
fn empty_stream_decodes_to_nothing() {
    let elements = decode_records(std::io::empty(), None, &LodPolicy::default()).unwrap();
    assert!(elements.is_empty());
}

#[test]
fn payload_overrun_discards_earlier_elements() {
    let mut writer = RecordWriter::new(Vec::new());
    writer.write_polyline(-1, 1030, &[(0, 0), (10, 10)]).unwrap();
    let header = RecordHeader {
        payload_len: 64,
        ..red_polyline_header()
    };
    writer.write_raw(&header, &[0; 16]).unwrap();
    let bytes = writer.finish().unwrap();

    let err = decode_records(bytes.as_slice(), None, &LodPolicy::default()).unwrap_err();
    match err {
        DecodeError::Format(FormatError::PayloadOverrun {
            record,
            declared,
            available,
        }) => {
            assert_eq!(record, 1);
            assert_eq!(declared, 64);
            assert_eq!(available, 16);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn overrun_in_filtered_record_is_still_an_error() {
    // Level -2 is filtered out at the coarsest bucket, but its payload still
    // has to be present in the stream.
    let header = RecordHeader {
        payload_len: 1_000,
        ..red_polyline_header()
    };
    let mut writer = RecordWriter::new(Vec::new());
    writer.write_raw(&header, &[0; 8]).unwrap();
    let bytes = writer.finish().unwrap();

    let err = decode_records(bytes.as_slice(), None, &LodPolicy::default()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Format(FormatError::PayloadOverrun { record: 0, .. })
    ));
}

#[test]
fn negative_payload_size_is_an_error() {
    let header = RecordHeader {
        payload_len: -8,
        ..red_polyline_header()
    };
    let mut writer = RecordWriter::new(Vec::new());
    writer.write_raw(&header, &[]).unwrap();
    let bytes = writer.finish().unwrap();

    let err = decode_records(bytes.as_slice(), None, &LodPolicy::default()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Format(FormatError::NegativeLength { value: -8, .. })
    ));
}

#[test]
fn polygon_rings_flatten_into_one_element() {
    let mut writer = RecordWriter::new(Vec::new());
    writer
        .write_polygon(
            0,
            2500,
            &[&[(0, 0), (100, 0), (100, 100)], &[(10, 10), (20, 10)]],
        )
        .unwrap();
    let bytes = writer.finish().unwrap();

    let elements = decode_records(bytes.as_slice(), None, &LodPolicy::default()).unwrap();
    assert_eq!(elements.len(), 1);
    let element = &elements[0];
    assert_eq!(element.kind(), GeometryKind::Polygon);
    assert_eq!(element.stroke_class(), StrokeClass::Blue);
    assert_eq!(element.geometry.len(), 5);
    assert_eq!(element.bounds(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
}

#[test]
fn decoder_stops_after_first_error() {
    let header = RecordHeader {
        payload_len: 32,
        ..red_polyline_header()
    };
    let mut writer = RecordWriter::new(Vec::new());
    writer.write_raw(&header, &[0; 4]).unwrap();
    let bytes = writer.finish().unwrap();

    let filter = RecordFilter::with_bucket(None, LodBucket(4));
    let mut decoder = RecordDecoder::new(bytes.as_slice(), filter);
    assert!(matches!(decoder.next(), Some(Err(_))));
    assert!(decoder.next().is_none());
}
