use tracing::trace;

use crate::core::scale::{Scale, TickValues};
use crate::core::{
    BucketStackScale, BucketedScale, ChartMode, Domain, LinearScale, NumericColumn, PixelRanges,
    TrackRecord,
};
use crate::error::{ChartError, ChartResult};

/// Mode-selected scale variant for one axis.
#[derive(Debug, Clone)]
pub enum AxisScale {
    Linear(LinearScale),
    Bucketed(BucketedScale),
    Stacked(BucketStackScale),
}

impl AxisScale {
    #[must_use]
    pub fn as_linear(&self) -> Option<&LinearScale> {
        match self {
            AxisScale::Linear(scale) => Some(scale),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bucketed(&self) -> Option<&BucketedScale> {
        match self {
            AxisScale::Bucketed(scale) => Some(scale),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_stacked(&self) -> Option<&BucketStackScale> {
        match self {
            AxisScale::Stacked(scale) => Some(scale),
            _ => None,
        }
    }
}

impl Scale for AxisScale {
    fn domain(&self) -> (f64, f64) {
        match self {
            AxisScale::Linear(scale) => scale.domain(),
            AxisScale::Bucketed(scale) => scale.domain(),
            AxisScale::Stacked(scale) => scale.domain(),
        }
    }

    fn set_domain(&mut self, domain: (f64, f64)) -> ChartResult<()> {
        match self {
            AxisScale::Linear(scale) => scale.set_domain(domain),
            AxisScale::Bucketed(scale) => scale.set_domain(domain),
            AxisScale::Stacked(scale) => scale.set_domain(domain),
        }
    }

    fn range(&self) -> (f64, f64) {
        match self {
            AxisScale::Linear(scale) => scale.range(),
            AxisScale::Bucketed(scale) => scale.range(),
            AxisScale::Stacked(scale) => scale.range(),
        }
    }

    fn set_range(&mut self, range: (f64, f64)) -> ChartResult<()> {
        match self {
            AxisScale::Linear(scale) => scale.set_range(range),
            AxisScale::Bucketed(scale) => scale.set_range(range),
            AxisScale::Stacked(scale) => scale.set_range(range),
        }
    }

    fn forward(&mut self, value: f64) -> f64 {
        match self {
            AxisScale::Linear(scale) => scale.forward(value),
            AxisScale::Bucketed(scale) => scale.forward(value),
            AxisScale::Stacked(scale) => scale.forward(value),
        }
    }

    fn invert(&self, pixel: f64) -> f64 {
        match self {
            AxisScale::Linear(scale) => scale.invert(pixel),
            AxisScale::Bucketed(scale) => scale.invert(pixel),
            AxisScale::Stacked(scale) => scale.invert(pixel),
        }
    }

    fn ticks(&self) -> TickValues {
        match self {
            AxisScale::Linear(scale) => scale.ticks(),
            AxisScale::Bucketed(scale) => scale.ticks(),
            AxisScale::Stacked(scale) => scale.ticks(),
        }
    }

    fn begin_pass(&mut self) {
        match self {
            AxisScale::Linear(scale) => scale.begin_pass(),
            AxisScale::Bucketed(scale) => scale.begin_pass(),
            AxisScale::Stacked(scale) => scale.begin_pass(),
        }
    }
}

/// Column pair projected by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedColumns {
    pub x: NumericColumn,
    pub y: NumericColumn,
}

impl SelectedColumns {
    #[must_use]
    pub fn new(x: NumericColumn, y: NumericColumn) -> Self {
        Self { x, y }
    }

    /// Column whose value feeds the y scale in `mode`.
    ///
    /// Histogram stacking resolves buckets from the x column.
    #[must_use]
    pub fn y_source(self, mode: ChartMode) -> NumericColumn {
        match mode {
            ChartMode::Scatter => self.y,
            ChartMode::Histogram => self.x,
        }
    }
}

/// Scales for both axes built for one mode and record set.
#[derive(Debug, Clone)]
pub struct ScalePair {
    pub mode: ChartMode,
    pub columns: SelectedColumns,
    pub x: AxisScale,
    pub y: AxisScale,
}

impl ScalePair {
    /// Resets per-pass state of both axes.
    pub fn begin_pass(&mut self) {
        self.x.begin_pass();
        self.y.begin_pass();
    }

    /// Maps one record through both scales, in pass order.
    pub fn project(&mut self, record: &TrackRecord) -> (f64, f64) {
        let x = self.x.forward(self.columns.x.value(record));
        let y = self
            .y
            .forward(self.columns.y_source(self.mode).value(record));
        (x, y)
    }
}

/// Builds the x/y scales for `mode`.
///
/// `records` must be non-empty; callers render an empty state instead of
/// asking for scales over nothing. `marker_radius_px` sets the histogram
/// stacking step (one marker diameter).
pub fn build_scales(
    records: &[TrackRecord],
    mode: ChartMode,
    columns: SelectedColumns,
    ranges: PixelRanges,
    marker_radius_px: f64,
) -> ChartResult<ScalePair> {
    if records.is_empty() {
        return Err(ChartError::EmptyRecordSet);
    }
    if !marker_radius_px.is_finite() || marker_radius_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "marker radius must be finite and > 0".to_owned(),
        ));
    }

    let x_domain = Domain::of_column(records, columns.x)?;
    let (x, y) = match mode {
        ChartMode::Scatter => {
            let y_domain = Domain::of_column(records, columns.y)?;
            (
                AxisScale::Linear(LinearScale::new(x_domain.as_tuple(), ranges.x)?),
                AxisScale::Linear(LinearScale::new(y_domain.as_tuple(), ranges.y)?),
            )
        }
        ChartMode::Histogram => {
            let mut stack =
                BucketStackScale::new(x_domain.as_tuple(), ranges.y, marker_radius_px * 2.0)?;
            stack.tally(records.iter().map(|record| columns.x.value(record)));
            (
                AxisScale::Bucketed(BucketedScale::new(x_domain.as_tuple(), ranges.x)?),
                AxisScale::Stacked(stack),
            )
        }
    };

    trace!(
        ?mode,
        x_column = columns.x.key(),
        y_column = columns.y_source(mode).key(),
        x_domain = ?x.domain(),
        records = records.len(),
        "built scales"
    );

    Ok(ScalePair { mode, columns, x, y })
}
