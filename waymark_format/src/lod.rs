// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::RecordHeader;

/// Detail bucket gating which record levels are decoded.
///
/// Bucket `1` is the coarsest. A polyline (negative level) is admitted when
/// `level >= -bucket`; a polygon (non-negative level) when `level <= bucket`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LodBucket(pub u8);

impl LodBucket {
    /// The coarsest bucket, used for unbounded loads.
    pub const COARSEST: Self = Self(1);

    /// Whether a record at `level` belongs to this bucket.
    #[must_use]
    pub fn admits(self, level: i8) -> bool {
        let bucket = i16::from(self.0);
        let level = i16::from(level);
        if level < 0 {
            level >= -bucket
        } else {
            level <= bucket
        }
    }
}

/// Maps the width of a requested region to a [`LodBucket`].
///
/// Thresholds are checked in order; the first whose width limit exceeds the
/// requested width wins. Wider regions fall back to [`LodPolicy::fallback`].
#[derive(Clone, Debug, PartialEq)]
pub struct LodPolicy {
    /// `(exclusive width limit, bucket)` pairs, narrowest first.
    pub thresholds: [(f64, LodBucket); 3],
    /// Bucket for regions at least as wide as every threshold.
    pub fallback: LodBucket,
}

impl Default for LodPolicy {
    fn default() -> Self {
        Self {
            thresholds: [
                (50_000.0, LodBucket(4)),
                (100_000.0, LodBucket(3)),
                (500_000.0, LodBucket(2)),
            ],
            fallback: LodBucket::COARSEST,
        }
    }
}

impl LodPolicy {
    /// Bucket for a load over `bounds`; unbounded loads use the coarsest bucket.
    #[must_use]
    pub fn bucket_for(&self, bounds: Option<Rect>) -> LodBucket {
        let Some(bounds) = bounds else {
            return LodBucket::COARSEST;
        };
        let width = bounds.width().abs();
        self.thresholds
            .iter()
            .find(|(limit, _)| width < *limit)
            .map_or(self.fallback, |&(_, bucket)| bucket)
    }
}

/// Combined level-of-detail and bounding-box filter applied to record headers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordFilter {
    bounds: Option<Rect>,
    bucket: LodBucket,
}

impl RecordFilter {
    /// Builds the filter for a load over `bounds` (file space).
    #[must_use]
    pub fn new(bounds: Option<Rect>, policy: &LodPolicy) -> Self {
        Self {
            bounds,
            bucket: policy.bucket_for(bounds),
        }
    }

    /// Builds a filter with an explicit bucket.
    #[must_use]
    pub fn with_bucket(bounds: Option<Rect>, bucket: LodBucket) -> Self {
        Self { bounds, bucket }
    }

    /// Query bounds, if any.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Active detail bucket.
    #[must_use]
    pub fn bucket(&self) -> LodBucket {
        self.bucket
    }

    /// Whether a record with this header passes both filters.
    #[must_use]
    pub fn admits(&self, header: &RecordHeader) -> bool {
        if !self.bucket.admits(header.level) {
            return false;
        }
        self.bounds.is_none_or(|query| header.intersects(query))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{LodBucket, LodPolicy};

    fn wide(width: f64) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, width, 10.0))
    }

    #[test]
    fn bucket_thresholds() {
        let policy = LodPolicy::default();
        assert_eq!(policy.bucket_for(None), LodBucket(1));
        assert_eq!(policy.bucket_for(wide(49_999.0)), LodBucket(4));
        assert_eq!(policy.bucket_for(wide(50_000.0)), LodBucket(3));
        assert_eq!(policy.bucket_for(wide(99_999.0)), LodBucket(3));
        assert_eq!(policy.bucket_for(wide(100_000.0)), LodBucket(2));
        assert_eq!(policy.bucket_for(wide(499_999.0)), LodBucket(2));
        assert_eq!(policy.bucket_for(wide(500_000.0)), LodBucket(1));
    }

    #[test]
    fn polylines_need_level_at_least_minus_bucket() {
        assert!(LodBucket(4).admits(-2));
        assert!(LodBucket(2).admits(-2));
        assert!(!LodBucket(1).admits(-2));
        assert!(LodBucket(1).admits(-1));
        assert!(!LodBucket(4).admits(-5));
        assert!(!LodBucket(4).admits(i8::MIN));
    }

    #[test]
    fn polygons_need_level_at_most_bucket() {
        assert!(LodBucket(1).admits(0));
        assert!(LodBucket(1).admits(1));
        assert!(!LodBucket(1).admits(2));
        assert!(LodBucket(4).admits(4));
        assert!(!LodBucket(4).admits(5));
    }
}
