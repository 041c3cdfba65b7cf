use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Tick values produced by [`Scale::ticks`], in domain units.
pub type TickValues = SmallVec<[f64; 16]>;

/// Default number of evenly spaced ticks for a linear domain query.
pub const DEFAULT_LINEAR_TICK_COUNT: usize = 12;

/// Bidirectional mapping between a value domain and a pixel range.
///
/// `Clone` keeps `domain` and `range` but never per-pass state, so a clone
/// always starts its next render pass from a clean slate.
pub trait Scale: Clone {
    fn domain(&self) -> (f64, f64);

    fn set_domain(&mut self, domain: (f64, f64)) -> ChartResult<()>;

    fn range(&self) -> (f64, f64);

    fn set_range(&mut self, range: (f64, f64)) -> ChartResult<()>;

    /// Maps a domain value to a pixel coordinate.
    ///
    /// Linear and bucket-position scales are pure. Stacking scales consume one
    /// slot of the value's bucket per call.
    fn forward(&mut self, value: f64) -> f64;

    /// Maps a pixel coordinate back to a domain value.
    fn invert(&self, pixel: f64) -> f64;

    fn ticks(&self) -> TickValues;

    /// Resets per-pass state before a render pass starts.
    fn begin_pass(&mut self) {}
}

pub(crate) fn validate_pair(pair: (f64, f64), what: &str) -> ChartResult<()> {
    if !pair.0.is_finite() || !pair.1.is_finite() {
        return Err(ChartError::InvalidData(format!("{what} must be finite")));
    }
    Ok(())
}

/// Position of `value` within `[start, end]` as a fraction of the span.
///
/// Spans wider than `f64::MAX` are normalized on halved operands so that
/// finite inputs keep producing finite fractions.
pub(crate) fn normalize(value: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span.is_finite() {
        return (value - start) / span;
    }
    (value * 0.5 - start * 0.5) / (end * 0.5 - start * 0.5)
}

/// Point at fraction `t` from `start` to `end`; finite for spans wider than
/// `f64::MAX`.
pub(crate) fn denormalize(t: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span.is_finite() {
        return start + t * span;
    }
    start * (1.0 - t) + end * t
}

/// `start + (end - start) * step / steps`, exact for integral inputs when the
/// intermediate product stays finite.
pub(crate) fn step_point(start: f64, end: f64, step: usize, steps: usize) -> f64 {
    let scaled = (end - start) * step as f64;
    if scaled.is_finite() {
        return start + scaled / steps as f64;
    }
    denormalize(step as f64 / steps as f64, start, end)
}

/// Exact affine map used by scatter mode on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Creates a scale over `domain` mapped onto `range`.
    ///
    /// A degenerate domain (`start == end`) is accepted: every value then maps
    /// to the middle of the range.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        validate_pair(domain, "scale domain")?;
        validate_pair(range, "scale range")?;
        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.domain_start == self.domain_end
    }

    /// Pure forward mapping.
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return (self.range_start + self.range_end) * 0.5;
        }
        let normalized = normalize(value, self.domain_start, self.domain_end);
        denormalize(normalized, self.range_start, self.range_end)
    }

    /// Evenly spaced domain values including both ends.
    #[must_use]
    pub fn ticks_with_count(&self, count: usize) -> TickValues {
        linspace(self.domain_start, self.domain_end, count)
    }
}

impl Scale for LinearScale {
    fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    fn set_domain(&mut self, domain: (f64, f64)) -> ChartResult<()> {
        validate_pair(domain, "scale domain")?;
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        Ok(())
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    fn set_range(&mut self, range: (f64, f64)) -> ChartResult<()> {
        validate_pair(range, "scale range")?;
        self.range_start = range.0;
        self.range_end = range.1;
        Ok(())
    }

    fn forward(&mut self, value: f64) -> f64 {
        self.map(value)
    }

    fn invert(&self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if self.is_degenerate() || span == 0.0 {
            return self.domain_start * 0.5 + self.domain_end * 0.5;
        }
        let normalized = normalize(pixel, self.range_start, self.range_end);
        denormalize(normalized, self.domain_start, self.domain_end)
    }

    fn ticks(&self) -> TickValues {
        self.ticks_with_count(DEFAULT_LINEAR_TICK_COUNT)
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> TickValues {
    match count {
        0 => TickValues::new(),
        1 => smallvec::smallvec![start],
        _ => {
            (0..count)
                .map(|index| {
                    if index == count - 1 {
                        end
                    } else {
                        step_point(start, end, index, count - 1)
                    }
                })
                .collect()
        }
    }
}
