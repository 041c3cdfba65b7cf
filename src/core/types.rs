use serde::{Deserialize, Serialize};

/// Measured pixel size of the chart container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Display mode of the analysis chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartMode {
    /// Continuous x/y placement through two linear scales.
    #[default]
    Scatter,
    /// Binned x placement with per-bucket vertical stacking.
    Histogram,
}

/// Pixel extents for both axes, `(start, end)` each.
///
/// The y range is usually inverted (`start > end`) because pixel y grows
/// downward while values grow upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRanges {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl PixelRanges {
    #[must_use]
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }
}
