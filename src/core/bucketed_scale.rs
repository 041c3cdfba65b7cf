//! Histogram-mode scales.
//!
//! The x axis snaps every value to the midpoint of one of [`N_BUCKETS`]
//! equal-width partitions of the normalized domain. The y axis is not value
//! derived: it hands out successive stacking offsets per bucket so markers
//! sharing a bucket form a non-overlapping column.

use crate::core::scale::{Scale, TickValues, denormalize, normalize, step_point, validate_pair};
use crate::error::{ChartError, ChartResult};

/// Number of histogram partitions of the normalized `[0, 1]` domain.
pub const N_BUCKETS: usize = 5;

/// Normalized position of boundary `index` (`0..=N_BUCKETS`).
#[must_use]
pub fn bucket_boundary(index: usize) -> f64 {
    index as f64 / N_BUCKETS as f64
}

/// Normalized midpoint of bucket `index`.
#[must_use]
pub fn bucket_midpoint(index: usize) -> f64 {
    (bucket_boundary(index) + bucket_boundary(index + 1)) * 0.5
}

/// Resolves a normalized value to its bucket.
///
/// Boundaries belong to the lower bucket, so `0.0` lands in bucket 0 and
/// `1.0` in the last bucket. Values outside `[0, 1]` are clamped; a
/// non-finite input (degenerate domain) resolves to bucket 0.
#[must_use]
pub fn bucket_for_normalized(normalized: f64) -> usize {
    if !normalized.is_finite() {
        return 0;
    }
    let normalized = normalized.clamp(0.0, 1.0);
    (0..=N_BUCKETS)
        .find(|&index| bucket_boundary(index) >= normalized)
        .map_or(N_BUCKETS - 1, |index| index.saturating_sub(1))
        .min(N_BUCKETS - 1)
}

fn normalize_in(domain: (f64, f64), value: f64) -> f64 {
    if domain.0 == domain.1 {
        return f64::NAN;
    }
    normalize(value, domain.0, domain.1)
}

/// Bucket index of `value` within `domain`.
#[must_use]
pub fn bucket_index(domain: (f64, f64), value: f64) -> usize {
    bucket_for_normalized(normalize_in(domain, value))
}

/// Per-bucket assignment counters.
pub type BucketCounts = [usize; N_BUCKETS];

/// Histogram x scale: value to bucket-midpoint pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketedScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl BucketedScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        validate_pair(domain, "bucketed scale domain")?;
        validate_pair(range, "bucketed scale range")?;
        Ok(Self { domain, range })
    }

    #[must_use]
    pub fn bucket_of(&self, value: f64) -> usize {
        bucket_index(self.domain, value)
    }

    /// Pixel at the midpoint of bucket `index`.
    #[must_use]
    pub fn bucket_center_px(&self, index: usize) -> f64 {
        denormalize(bucket_midpoint(index), self.range.0, self.range.1)
    }

    /// Pixel at normalized boundary `index` (`0..=N_BUCKETS`).
    #[must_use]
    pub fn boundary_px(&self, index: usize) -> f64 {
        step_point(self.range.0, self.range.1, index, N_BUCKETS)
    }

    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        self.bucket_center_px(self.bucket_of(value))
    }

    /// Value at the midpoint of bucket `index`, in domain units.
    #[must_use]
    pub fn representative_value(&self, index: usize) -> f64 {
        denormalize(bucket_midpoint(index), self.domain.0, self.domain.1)
    }
}

impl Scale for BucketedScale {
    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn set_domain(&mut self, domain: (f64, f64)) -> ChartResult<()> {
        validate_pair(domain, "bucketed scale domain")?;
        self.domain = domain;
        Ok(())
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn set_range(&mut self, range: (f64, f64)) -> ChartResult<()> {
        validate_pair(range, "bucketed scale range")?;
        self.range = range;
        Ok(())
    }

    fn forward(&mut self, value: f64) -> f64 {
        self.map(value)
    }

    /// Returns the representative midpoint value of the bucket under `pixel`.
    ///
    /// This is lossy: every pixel of a bucket inverts to the same value.
    fn invert(&self, pixel: f64) -> f64 {
        let span = self.range.1 - self.range.0;
        let normalized = if span == 0.0 {
            0.0
        } else {
            (pixel - self.range.0) / span
        };
        self.representative_value(bucket_for_normalized(normalized))
    }

    /// Denormalized bucket boundaries, `N_BUCKETS + 1` values.
    fn ticks(&self) -> TickValues {
        (0..=N_BUCKETS)
            .map(|index| step_point(self.domain.0, self.domain.1, index, N_BUCKETS))
            .collect()
    }
}

/// Histogram y scale: hands out stacking offsets per bucket.
///
/// `domain` is the binned column's extent (used to resolve buckets), `range`
/// is the pixel extent whose start is the stacking baseline.
#[derive(Debug)]
pub struct BucketStackScale {
    domain: (f64, f64),
    range: (f64, f64),
    step_px: f64,
    totals: BucketCounts,
    counters: BucketCounts,
}

impl BucketStackScale {
    pub fn new(domain: (f64, f64), range: (f64, f64), step_px: f64) -> ChartResult<Self> {
        validate_pair(domain, "stack scale domain")?;
        validate_pair(range, "stack scale range")?;
        if !step_px.is_finite() || step_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "stack step must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            domain,
            range,
            step_px,
            totals: [0; N_BUCKETS],
            counters: [0; N_BUCKETS],
        })
    }

    /// Records how many values fall into each bucket.
    ///
    /// Totals drive the count axis; they are independent of the per-pass
    /// running counters.
    pub fn tally<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        self.totals = [0; N_BUCKETS];
        for value in values {
            self.totals[bucket_index(self.domain, value)] += 1;
        }
    }

    #[must_use]
    pub fn step_px(&self) -> f64 {
        self.step_px
    }

    #[must_use]
    pub fn baseline_px(&self) -> f64 {
        self.range.0
    }

    #[must_use]
    pub fn totals(&self) -> BucketCounts {
        self.totals
    }

    /// Running counters of the current pass.
    #[must_use]
    pub fn counters(&self) -> BucketCounts {
        self.counters
    }

    #[must_use]
    pub fn max_bucket_count(&self) -> usize {
        self.totals.iter().copied().max().unwrap_or(0)
    }

    /// Pixel of stacking slot `slot` (0 sits on the baseline).
    #[must_use]
    pub fn slot_px(&self, slot: usize) -> f64 {
        self.range.0 - self.step_px * slot as f64
    }

    /// Pixel at the top edge of a stack holding `count` markers.
    ///
    /// A count of 0 is the bottom edge of the first slot, which is where the
    /// x axis line is drawn.
    #[must_use]
    pub fn count_edge_px(&self, count: usize) -> f64 {
        self.range.0 + self.step_px * 0.5 - self.step_px * count as f64
    }
}

impl Clone for BucketStackScale {
    fn clone(&self) -> Self {
        Self {
            domain: self.domain,
            range: self.range,
            step_px: self.step_px,
            totals: self.totals,
            counters: [0; N_BUCKETS],
        }
    }
}

impl Scale for BucketStackScale {
    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn set_domain(&mut self, domain: (f64, f64)) -> ChartResult<()> {
        validate_pair(domain, "stack scale domain")?;
        self.domain = domain;
        Ok(())
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn set_range(&mut self, range: (f64, f64)) -> ChartResult<()> {
        validate_pair(range, "stack scale range")?;
        self.range = range;
        Ok(())
    }

    /// Takes the next free slot of `value`'s bucket.
    fn forward(&mut self, value: f64) -> f64 {
        let bucket = bucket_index(self.domain, value);
        let slot = self.counters[bucket];
        self.counters[bucket] += 1;
        self.slot_px(slot)
    }

    /// Returns the stacking slot (marker count below) under `pixel`.
    fn invert(&self, pixel: f64) -> f64 {
        ((self.range.0 - pixel) / self.step_px).max(0.0)
    }

    /// Integer counts from 0 to the fullest bucket.
    fn ticks(&self) -> TickValues {
        (0..=self.max_bucket_count()).map(|count| count as f64).collect()
    }

    fn begin_pass(&mut self) {
        self.counters = [0; N_BUCKETS];
    }
}

#[cfg(test)]
mod tests {
    use super::{BucketedScale, N_BUCKETS, bucket_for_normalized, bucket_index, bucket_midpoint};
    use crate::core::scale::Scale;

    #[test]
    fn boundaries_belong_to_lower_bucket() {
        assert_eq!(bucket_for_normalized(0.0), 0);
        assert_eq!(bucket_for_normalized(0.2), 0);
        assert_eq!(bucket_for_normalized(0.2000001), 1);
        assert_eq!(bucket_for_normalized(1.0), N_BUCKETS - 1);
    }

    #[test]
    fn out_of_domain_values_clamp() {
        assert_eq!(bucket_for_normalized(-3.0), 0);
        assert_eq!(bucket_for_normalized(7.5), N_BUCKETS - 1);
        assert_eq!(bucket_for_normalized(f64::NAN), 0);
    }

    #[test]
    fn domain_wider_than_f64_max_keeps_extremes_in_end_buckets() {
        let domain = (-1e308, 1e308);
        assert_eq!(bucket_index(domain, -1e308), 0);
        assert_eq!(bucket_index(domain, 1e308), N_BUCKETS - 1);

        let scale = BucketedScale::new(domain, (0.0, 500.0)).expect("bucketed scale");
        assert_eq!(scale.map(1e308), 450.0);
        assert!(scale.ticks().iter().all(|value| value.is_finite()));
    }

    #[test]
    fn midpoints_are_centered() {
        assert!((bucket_midpoint(0) - 0.1).abs() <= 1e-12);
        assert!((bucket_midpoint(N_BUCKETS - 1) - 0.9).abs() <= 1e-12);
    }
}
