// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{error, fmt, io};

/// A record whose declared lengths disagree with the bytes actually present.
///
/// Every variant carries the zero-based index of the offending record in the
/// stream (counting filtered-out records too).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// A length or count field holds a negative value.
    NegativeLength {
        /// Record index.
        record: usize,
        /// Which field was negative.
        field: &'static str,
        /// The raw value read.
        value: i32,
    },
    /// The header declares more payload bytes than the stream still holds.
    PayloadOverrun {
        /// Record index.
        record: usize,
        /// Payload size from the header.
        declared: usize,
        /// Bytes that could actually be read.
        available: usize,
    },
    /// A polygon ring declares more points than the rest of the payload holds.
    RingOverrun {
        /// Record index.
        record: usize,
        /// Zero-based ring index within the record.
        ring: usize,
        /// Declared point count.
        points: usize,
        /// Payload bytes left after the count field.
        remaining: usize,
    },
    /// The payload ends in the middle of a point pair or ring count.
    MisalignedPayload {
        /// Record index.
        record: usize,
        /// Payload length in bytes.
        len: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLength {
                record,
                field,
                value,
            } => write!(f, "record {record}: negative {field} ({value})"),
            Self::PayloadOverrun {
                record,
                declared,
                available,
            } => write!(
                f,
                "record {record}: payload declares {declared} bytes but only {available} remain"
            ),
            Self::RingOverrun {
                record,
                ring,
                points,
                remaining,
            } => write!(
                f,
                "record {record}: ring {ring} declares {points} points but only {remaining} payload bytes remain"
            ),
            Self::MisalignedPayload { record, len } => write!(
                f,
                "record {record}: payload of {len} bytes ends inside a field"
            ),
        }
    }
}

impl error::Error for FormatError {}

/// Error returned when decoding a record stream fails.
///
/// A failed decode yields no elements at all: callers never see a partial
/// result.
#[derive(Debug)]
pub enum DecodeError {
    /// The underlying reader failed.
    Io(io::Error),
    /// The stream is malformed.
    Format(FormatError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read map records: {err}"),
            Self::Format(err) => write!(f, "malformed map records: {err}"),
        }
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<FormatError> for DecodeError {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}
