use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{NumericColumn, ScalePair, TrackRecord};
use crate::error::{ChartError, ChartResult};
use crate::interaction::Tooltip;
use crate::render::{
    ChartStyle, CirclePrimitive, MarkerGeometry, MarkerPhase, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive, Transition, TransitionTiming,
};

/// Visual representation of one bound record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub record_id: String,
    pub title: String,
    /// Active x-column value of the record, shown by the tooltip.
    pub value: f64,
    /// Position of the record in the last bound set.
    pub index: usize,
    pub phase: MarkerPhase,
    pub current: MarkerGeometry,
    pub target: MarkerGeometry,
    pub transition: Option<Transition>,
}

impl Marker {
    fn entering(
        record: &TrackRecord,
        value: f64,
        index: usize,
        target: MarkerGeometry,
        now_ms: f64,
        timing: TransitionTiming,
    ) -> Self {
        let from = target.collapsed();
        Self {
            record_id: record.id.clone(),
            title: record.title.clone(),
            value,
            index,
            phase: MarkerPhase::Entering,
            current: from,
            target,
            transition: Some(Transition {
                from,
                to: target,
                start_ms: now_ms,
                delay_ms: 0.0,
                duration_ms: timing.duration_ms,
                ease: timing.ease,
            }),
        }
    }

    fn sync(&mut self, now_ms: f64) {
        if let Some(transition) = self.transition {
            self.current = transition.sample(now_ms);
        }
    }

    /// Starts a transition from the geometry at `now_ms`, replacing any
    /// transition still in flight.
    fn retarget(
        &mut self,
        phase: MarkerPhase,
        target: MarkerGeometry,
        now_ms: f64,
        delay_ms: f64,
        timing: TransitionTiming,
    ) {
        self.sync(now_ms);
        self.phase = phase;
        self.target = target;
        self.transition = Some(Transition {
            from: self.current,
            to: target,
            start_ms: now_ms,
            delay_ms,
            duration_ms: timing.duration_ms,
            ease: timing.ease,
        });
    }

    fn exit(&mut self, now_ms: f64, timing: TransitionTiming) {
        self.sync(now_ms);
        let target = self.current.collapsed();
        self.retarget(MarkerPhase::Exiting, target, now_ms, 0.0, timing);
    }

    /// Advances the marker to `now_ms`. Returns `true` once an exit completed.
    fn step(&mut self, now_ms: f64) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };
        self.current = transition.sample(now_ms);
        if !transition.is_complete(now_ms) {
            return false;
        }

        self.transition = None;
        if self.phase == MarkerPhase::Exiting {
            return true;
        }
        self.phase = MarkerPhase::Idle;
        false
    }

    /// Pointer hit test against the current geometry. Exiting markers are inert.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.phase == MarkerPhase::Exiting || self.current.radius <= 0.0 {
            return false;
        }
        let dx = x - self.current.x;
        let dy = y - self.current.y;
        dx * dx + dy * dy <= self.current.radius * self.current.radius
    }
}

/// Marker counts produced by one bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BindSummary {
    pub entered: usize,
    pub updated: usize,
    pub exiting: usize,
}

/// Binds records to markers, animates them and owns the hover tooltip.
#[derive(Debug, Clone)]
pub struct RenderEngine {
    timing: TransitionTiming,
    marker_radius_px: f64,
    tooltip_offset_px: f64,
    markers: IndexMap<String, Marker>,
    active_column: Option<NumericColumn>,
    tooltip: Tooltip,
}

impl RenderEngine {
    pub fn new(
        timing: TransitionTiming,
        marker_radius_px: f64,
        tooltip_offset_px: f64,
    ) -> ChartResult<Self> {
        if !timing.duration_ms.is_finite() || timing.duration_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "transition duration must be finite and >= 0".to_owned(),
            ));
        }
        if !timing.stagger_ms.is_finite() || timing.stagger_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "transition stagger must be finite and >= 0".to_owned(),
            ));
        }
        if !marker_radius_px.is_finite() || marker_radius_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        if !tooltip_offset_px.is_finite() {
            return Err(ChartError::InvalidData(
                "tooltip offset must be finite".to_owned(),
            ));
        }

        Ok(Self {
            timing,
            marker_radius_px,
            tooltip_offset_px,
            markers: IndexMap::new(),
            active_column: None,
            tooltip: Tooltip::default(),
        })
    }

    /// Binds `records` through `scales`, starting enter/update/exit
    /// transitions at `now_ms`.
    ///
    /// Per-pass scale state is reset first, so binding the same records twice
    /// yields the same targets. Records are projected in slice order; a
    /// repeated identifier keeps its first occurrence.
    pub fn bind(
        &mut self,
        records: &[TrackRecord],
        scales: &mut ScalePair,
        now_ms: f64,
    ) -> ChartResult<BindSummary> {
        scales.begin_pass();

        let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
        let mut projected = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id.as_str()) {
                warn!(record_id = %record.id, "skipping duplicate record id during bind");
                continue;
            }
            let (x, y) = scales.project(record);
            if !x.is_finite() || !y.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "projection of record `{}` is not finite (x={x}, y={y})",
                    record.id
                )));
            }
            projected.push((record, x, y));
        }

        let column = scales.columns.x;
        self.active_column = Some(column);

        let mut summary = BindSummary::default();
        for (index, (record, x, y)) in projected.into_iter().enumerate() {
            let target = MarkerGeometry::visible(x, y, self.marker_radius_px);
            let value = column.value(record);
            match self.markers.get_mut(record.id.as_str()) {
                Some(marker) => {
                    marker.title.clone_from(&record.title);
                    marker.value = value;
                    marker.index = index;
                    marker.retarget(
                        MarkerPhase::Updating,
                        target,
                        now_ms,
                        index as f64 * self.timing.stagger_ms,
                        self.timing,
                    );
                    summary.updated += 1;
                }
                None => {
                    self.markers.insert(
                        record.id.clone(),
                        Marker::entering(record, value, index, target, now_ms, self.timing),
                    );
                    summary.entered += 1;
                }
            }
        }

        for marker in self.markers.values_mut() {
            if !seen.contains(marker.record_id.as_str()) && marker.phase != MarkerPhase::Exiting
            {
                marker.exit(now_ms, self.timing);
                summary.exiting += 1;
            }
        }

        debug!(
            entered = summary.entered,
            updated = summary.updated,
            exiting = summary.exiting,
            "bound markers"
        );
        Ok(summary)
    }

    /// Advances every transition to `now_ms` and drops markers whose exit finished.
    pub fn advance(&mut self, now_ms: f64) {
        let before = self.markers.len();
        self.markers.retain(|_, marker| !marker.step(now_ms));
        let removed = before - self.markers.len();
        if removed > 0 {
            trace!(removed, remaining = self.markers.len(), "discarded exited markers");
        }
    }

    /// Drops every marker without animation and hides the tooltip.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.active_column = None;
        self.on_pointer_leave();
    }

    #[must_use]
    pub fn has_pending_transitions(&self) -> bool {
        self.markers
            .values()
            .any(|marker| marker.transition.is_some())
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    #[must_use]
    pub fn marker(&self, record_id: &str) -> Option<&Marker> {
        self.markers.get(record_id)
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Topmost (last drawn) marker under the pointer.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Marker> {
        self.markers
            .values()
            .rev()
            .find(|marker| marker.contains(x, y))
    }

    #[must_use]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Shows the tooltip for `record_id` anchored near the pointer.
    ///
    /// Returns `false` when no live marker is bound to that id.
    pub fn on_pointer_enter(&mut self, record_id: &str, pointer_x: f64, pointer_y: f64) -> bool {
        let Some(marker) = self
            .markers
            .get(record_id)
            .filter(|marker| marker.phase != MarkerPhase::Exiting)
        else {
            return false;
        };

        self.tooltip = Tooltip {
            visible: true,
            x: pointer_x + self.tooltip_offset_px,
            y: pointer_y,
            record_id: marker.record_id.clone(),
            title: marker.title.clone(),
            column_label: self
                .active_column
                .map(NumericColumn::display_name)
                .unwrap_or_default()
                .to_owned(),
            value: marker.value,
        };
        true
    }

    pub fn on_pointer_leave(&mut self) {
        self.tooltip.visible = false;
    }

    /// Appends marker circles and the tooltip (when visible) to `frame`.
    pub fn append_primitives(&self, frame: &mut RenderFrame, style: ChartStyle) {
        frame.circles.extend(self.markers.values().map(|marker| {
            CirclePrimitive::new(
                marker.current.x,
                marker.current.y,
                marker.current.radius.max(0.0),
                style.marker_fill.faded(marker.current.opacity),
            )
        }));

        if !self.tooltip.visible {
            return;
        }
        let padding = style.tooltip_line_height_px * 0.5;
        let lines = self.tooltip.lines();
        frame.rects.push(RectPrimitive::new(
            self.tooltip.x,
            self.tooltip.y,
            style.tooltip_width_px,
            style.tooltip_line_height_px * lines.len() as f64 + padding * 2.0,
            style.tooltip_background,
        ));
        for (row, line) in lines.into_iter().enumerate() {
            frame.texts.push(TextPrimitive::new(
                line,
                self.tooltip.x + padding,
                self.tooltip.y + padding + style.tooltip_line_height_px * (row as f64 + 0.5),
                style.label_font_size_px,
                style.tooltip_text,
                TextHAlign::Left,
            ));
        }
    }
}
