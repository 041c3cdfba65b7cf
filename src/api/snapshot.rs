use serde::{Deserialize, Serialize};

use crate::core::{ChartMode, NumericColumn, Scale, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::Tooltip;
use crate::render::{Marker, Renderer};

use super::{Axis, ChartController, Tick};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub mode: ChartMode,
    pub x_column: NumericColumn,
    pub y_column: NumericColumn,
    pub viewport: Option<Viewport>,
    pub x_domain: Option<(f64, f64)>,
    pub y_domain: Option<(f64, f64)>,
    pub x_caption: String,
    pub y_caption: String,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub markers: Vec<Marker>,
    pub tooltip: Tooltip,
    pub cursor: Option<(f64, f64)>,
    pub clock_ms: f64,
}

impl<R: Renderer> ChartController<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let captions = self.axis_captions();
        let columns = self.columns();
        ChartSnapshot {
            mode: self.mode(),
            x_column: columns.x,
            y_column: columns.y,
            viewport: self.viewport(),
            x_domain: self.scales().map(|scales| scales.x.domain()),
            y_domain: self.scales().map(|scales| scales.y.domain()),
            x_caption: captions.x.to_owned(),
            y_caption: captions.y.to_owned(),
            x_ticks: self.ticks().get(Axis::X).to_vec(),
            y_ticks: self.ticks().get(Axis::Y).to_vec(),
            markers: self.markers().cloned().collect(),
            tooltip: self.tooltip().clone(),
            cursor: self.cursor(),
            clock_ms: self.clock_ms(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
