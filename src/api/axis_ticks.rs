use serde::{Deserialize, Serialize};

use crate::core::{AxisScale, BucketStackScale, BucketedScale, LinearScale, Scale, linspace};

/// Axis selector for tick collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// One labeled reference point along an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position_px: f64,
    pub value: f64,
    pub label: String,
}

/// Owned tick handles for both axes.
///
/// Each render pass replaces an axis' ticks wholesale; nothing is appended
/// to a previous set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisTicks {
    x: Vec<Tick>,
    y: Vec<Tick>,
}

impl AxisTicks {
    #[must_use]
    pub fn get(&self, axis: Axis) -> &[Tick] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn replace(&mut self, axis: Axis, ticks: impl IntoIterator<Item = Tick>) {
        let slot = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        };
        slot.clear();
        slot.extend(ticks);
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }
}

/// Formats a tick value: integral values without a decimal point, anything
/// else with two decimals.
#[must_use]
pub fn format_tick_label(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    // Avoid rendering "-0".
    let value = if value == 0.0 { 0.0 } else { value };
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Derives the ticks of one axis from its scale.
///
/// - linear (scatter): `scatter_tick_count` ticks labeled from `0` up to the
///   domain maximum, spread evenly over the pixel range;
/// - bucketed (histogram x): `N_BUCKETS + 1` ticks on bucket boundaries;
/// - stacked (histogram y): one tick per count from `0` to the fullest bucket,
///   each on the top edge of a stack of that many markers.
#[must_use]
pub fn generate_ticks(scale: &AxisScale, scatter_tick_count: usize) -> Vec<Tick> {
    match scale {
        AxisScale::Linear(linear) => scatter_ticks(linear, scatter_tick_count),
        AxisScale::Bucketed(bucketed) => boundary_ticks(bucketed),
        AxisScale::Stacked(stacked) => count_ticks(stacked),
    }
}

// The lower label bound stays at 0 rather than the column minimum; labels
// therefore do not line up with marker positions when the minimum is not 0.
fn scatter_ticks(scale: &LinearScale, count: usize) -> Vec<Tick> {
    let (_, upper) = scale.domain();
    let (range_start, range_end) = scale.range();
    let values = linspace(0.0, upper, count);
    let positions = linspace(range_start, range_end, count);
    values
        .into_iter()
        .zip(positions)
        .map(|(value, position_px)| Tick {
            position_px,
            value,
            label: format_tick_label(value),
        })
        .collect()
}

fn boundary_ticks(scale: &BucketedScale) -> Vec<Tick> {
    scale
        .ticks()
        .into_iter()
        .enumerate()
        .map(|(index, value)| Tick {
            position_px: scale.boundary_px(index),
            value,
            label: format_tick_label(value),
        })
        .collect()
}

fn count_ticks(scale: &BucketStackScale) -> Vec<Tick> {
    (0..=scale.max_bucket_count())
        .map(|count| Tick {
            position_px: scale.count_edge_px(count),
            value: count as f64,
            label: count.to_string(),
        })
        .collect()
}
