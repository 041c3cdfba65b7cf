use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Colors and sizes used when materializing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub marker_fill: Color,
    pub axis_color: Color,
    pub label_color: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
    pub axis_stroke_width: f64,
    pub tick_length_px: f64,
    pub label_font_size_px: f64,
    pub tooltip_width_px: f64,
    pub tooltip_line_height_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            marker_fill: Color::rgba(0.29, 0.47, 0.84, 0.85),
            axis_color: Color::rgb(0.45, 0.45, 0.45),
            label_color: Color::rgb(0.2, 0.2, 0.2),
            tooltip_background: Color::rgba(0.1, 0.1, 0.1, 0.9),
            tooltip_text: Color::rgb(1.0, 1.0, 1.0),
            axis_stroke_width: 1.0,
            tick_length_px: 6.0,
            label_font_size_px: 11.0,
            tooltip_width_px: 180.0,
            tooltip_line_height_px: 16.0,
        }
    }
}

impl ChartStyle {
    pub fn validate(self) -> ChartResult<Self> {
        for color in [
            self.marker_fill,
            self.axis_color,
            self.label_color,
            self.tooltip_background,
            self.tooltip_text,
        ] {
            color.validate()?;
        }
        for (value, name) in [
            (self.axis_stroke_width, "axis_stroke_width"),
            (self.tick_length_px, "tick_length_px"),
            (self.label_font_size_px, "label_font_size_px"),
            (self.tooltip_width_px, "tooltip_width_px"),
            (self.tooltip_line_height_px, "tooltip_line_height_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "chart style `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}
