use serde::{Deserialize, Serialize};

use crate::core::{ChartMode, NumericColumn, PixelRanges, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartStyle, Ease, TransitionTiming};

/// Public chart bootstrap configuration.
///
/// Serializable so host applications can ship chart setup as JSON. Missing
/// fields fall back to the defaults of the analysis view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub marker_radius_px: f64,
    pub padding_left_px: f64,
    pub padding_vertical_px: f64,
    pub transition: TransitionTiming,
    pub scatter_tick_count: usize,
    /// Horizontal gap between the pointer and the tooltip anchor.
    pub tooltip_offset_px: f64,
    pub initial_mode: ChartMode,
    pub initial_x_column: NumericColumn,
    pub initial_y_column: NumericColumn,
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            marker_radius_px: 5.0,
            padding_left_px: 50.0,
            padding_vertical_px: 50.0,
            transition: TransitionTiming::default(),
            scatter_tick_count: 12,
            tooltip_offset_px: 10.0,
            initial_mode: ChartMode::Scatter,
            initial_x_column: NumericColumn::Acousticness,
            initial_y_column: NumericColumn::Danceability,
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_marker_radius_px(mut self, radius_px: f64) -> Self {
        self.marker_radius_px = radius_px;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, left_px: f64, vertical_px: f64) -> Self {
        self.padding_left_px = left_px;
        self.padding_vertical_px = vertical_px;
        self
    }

    #[must_use]
    pub fn with_transition(mut self, duration_ms: f64, stagger_ms: f64, ease: Ease) -> Self {
        self.transition = TransitionTiming {
            duration_ms,
            stagger_ms,
            ease,
        };
        self
    }

    #[must_use]
    pub fn with_initial_mode(mut self, mode: ChartMode) -> Self {
        self.initial_mode = mode;
        self
    }

    #[must_use]
    pub fn with_initial_columns(mut self, x: NumericColumn, y: NumericColumn) -> Self {
        self.initial_x_column = x;
        self.initial_y_column = y;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.marker_radius_px.is_finite() || self.marker_radius_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        for (value, name) in [
            (self.padding_left_px, "padding_left_px"),
            (self.padding_vertical_px, "padding_vertical_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "chart config `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.scatter_tick_count < 2 {
            return Err(ChartError::InvalidData(
                "scatter tick count must be >= 2".to_owned(),
            ));
        }
        for column in [self.initial_x_column, self.initial_y_column] {
            if !column.is_selectable() {
                return Err(ChartError::UnknownColumn(column.key().to_owned()));
            }
        }
        self.style.validate()?;
        Ok(self)
    }

    /// Pixel extents of both axes inside `viewport`.
    ///
    /// x spans `[radius + padding_left, width - radius]`; y spans
    /// `[height - padding_vertical, padding_vertical]` so larger values sit
    /// higher on screen.
    #[must_use]
    pub fn pixel_ranges(&self, viewport: Viewport) -> PixelRanges {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        PixelRanges::new(
            (
                self.marker_radius_px + self.padding_left_px,
                width - self.marker_radius_px,
            ),
            (
                height - self.padding_vertical_px,
                self.padding_vertical_px,
            ),
        )
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}
