use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::{
    ChartMode, NumericColumn, ScalePair, SelectedColumns, TrackRecord, Viewport, build_scales,
    derive_view,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{InteractionState, Tooltip};
use crate::render::{Marker, RenderEngine, RenderFrame, Renderer};

use super::frame_builder::{FrameInputs, build_chart_frame};
use super::{Axis, AxisTicks, ChartConfig, generate_ticks};

/// Caption shown on the y axis in histogram mode.
pub const HISTOGRAM_Y_CAPTION: &str = "# of Tracks";

/// Axis captions for the current mode and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCaptions {
    pub x: &'static str,
    pub y: &'static str,
}

/// One entry of a column selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnOption {
    pub column: NumericColumn,
    pub key: &'static str,
    pub label: &'static str,
}

/// Owns the user-selectable chart state and drives full render passes.
///
/// Every control change runs scale build, tick rebuild and marker bind in
/// that order, then hands a fresh frame to the renderer. Nothing renders
/// until the host signals that the container has a measurable size.
pub struct ChartController<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    mode: ChartMode,
    columns: SelectedColumns,
    records: Option<Arc<[TrackRecord]>>,
    view: Vec<TrackRecord>,
    container: Option<Viewport>,
    scales: Option<ScalePair>,
    ticks: AxisTicks,
    engine: RenderEngine,
    interaction: InteractionState,
    clock_ms: f64,
    render_passes: u64,
}

impl<R: Renderer> ChartController<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let engine = RenderEngine::new(
            config.transition,
            config.marker_radius_px,
            config.tooltip_offset_px,
        )?;

        Ok(Self {
            renderer,
            config,
            mode: config.initial_mode,
            columns: SelectedColumns::new(config.initial_x_column, config.initial_y_column),
            records: None,
            view: Vec::new(),
            container: None,
            scales: None,
            ticks: AxisTicks::default(),
            engine,
            interaction: InteractionState::default(),
            clock_ms: 0.0,
            render_passes: 0,
        })
    }

    /// One-time layout readiness signal carrying the measured container size.
    ///
    /// Performs the first full render. Later calls are ignored; use
    /// [`Self::resize`] for size changes.
    pub fn container_ready(&mut self, viewport: Viewport) -> ChartResult<()> {
        validate_viewport(viewport)?;
        if self.container.is_some() {
            debug!(?viewport, "container already ready; ignoring repeated signal");
            return Ok(());
        }
        debug!(width = viewport.width, height = viewport.height, "container ready");
        self.container = Some(viewport);
        self.apply_change(|chart| chart.container = None)
    }

    /// Re-measures the container and redraws.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        validate_viewport(viewport)?;
        if self.container == Some(viewport) {
            return Ok(());
        }
        debug!(width = viewport.width, height = viewport.height, "container resized");
        let previous = self.container.replace(viewport);
        self.apply_change(move |chart| chart.container = previous)
    }

    /// Replaces the record set.
    ///
    /// Passing the same `Arc` again is not an identity change and does
    /// nothing. Records sharing an id keep their first occurrence.
    pub fn set_records(&mut self, records: impl Into<Arc<[TrackRecord]>>) -> ChartResult<()> {
        let records = records.into();
        if self
            .records
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &records))
        {
            trace!("record set identity unchanged");
            return Ok(());
        }

        let view = canonicalize_view(derive_view(&records));
        debug!(
            original_count = records.len(),
            canonical_count = view.len(),
            "set records"
        );
        let previous_records = self.records.replace(records);
        let previous_view = std::mem::replace(&mut self.view, view);
        self.apply_change(move |chart| {
            chart.records = previous_records;
            chart.view = previous_view;
        })
    }

    /// Drops the record set; the chart renders its empty state.
    pub fn clear_records(&mut self) -> ChartResult<()> {
        if self.records.is_none() {
            return Ok(());
        }
        debug!("clear records");
        self.records = None;
        self.view.clear();
        self.redraw()
    }

    pub fn set_mode(&mut self, mode: ChartMode) -> ChartResult<()> {
        if self.mode == mode {
            return Ok(());
        }
        debug!(from = ?self.mode, to = ?mode, "set chart mode");
        let previous = std::mem::replace(&mut self.mode, mode);
        self.apply_change(move |chart| chart.mode = previous)
    }

    pub fn set_x_column(&mut self, column: NumericColumn) -> ChartResult<()> {
        ensure_selectable(column)?;
        if self.columns.x == column {
            return Ok(());
        }
        debug!(column = column.key(), "set x column");
        let previous = std::mem::replace(&mut self.columns.x, column);
        self.apply_change(move |chart| chart.columns.x = previous)
    }

    /// Sets the y column. In histogram mode the choice is stored but does
    /// not trigger a redraw since the y axis shows counts.
    pub fn set_y_column(&mut self, column: NumericColumn) -> ChartResult<()> {
        ensure_selectable(column)?;
        if self.columns.y == column {
            return Ok(());
        }
        debug!(column = column.key(), "set y column");
        let previous = std::mem::replace(&mut self.columns.y, column);
        if self.mode == ChartMode::Histogram {
            return Ok(());
        }
        self.apply_change(move |chart| chart.columns.y = previous)
    }

    /// Selector-facing variant of [`Self::set_x_column`].
    pub fn set_x_column_key(&mut self, key: &str) -> ChartResult<()> {
        self.set_x_column(NumericColumn::from_key(key)?)
    }

    /// Selector-facing variant of [`Self::set_y_column`].
    pub fn set_y_column_key(&mut self, key: &str) -> ChartResult<()> {
        self.set_y_column(NumericColumn::from_key(key)?)
    }

    /// Advances animations to `now_ms` and renders the resulting frame.
    ///
    /// Transitions started by later control changes begin at this timestamp.
    pub fn advance(&mut self, now_ms: f64) -> ChartResult<()> {
        if !now_ms.is_finite() {
            return Err(ChartError::InvalidData(
                "animation clock must be finite".to_owned(),
            ));
        }
        if now_ms < self.clock_ms {
            warn!(
                now_ms,
                clock_ms = self.clock_ms,
                "animation clock moved backwards"
            );
        }
        self.clock_ms = now_ms;
        self.engine.advance(now_ms);
        self.render_frame()
    }

    /// Routes pointer movement to marker hover enter/leave.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer coordinates must be finite".to_owned(),
            ));
        }
        self.interaction.on_pointer_move(x, y);
        let hovered = self
            .engine
            .hit_test(x, y)
            .map(|marker| marker.record_id.clone());
        if !self.interaction.set_hovered(hovered.as_deref()) {
            return Ok(());
        }

        match hovered {
            Some(record_id) => {
                trace!(%record_id, "pointer entered marker");
                self.engine.on_pointer_enter(&record_id, x, y);
            }
            None => {
                trace!("pointer left marker");
                self.engine.on_pointer_leave();
            }
        }
        self.render_frame()
    }

    /// Pointer left the chart container.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        let was_hovering = self.interaction.hovered().is_some();
        self.interaction.on_pointer_leave();
        if !was_hovering {
            return Ok(());
        }
        self.engine.on_pointer_leave();
        self.render_frame()
    }

    /// Runs a full render pass: scales, ticks, marker bind, frame.
    pub fn redraw(&mut self) -> ChartResult<()> {
        self.run_pass()?;
        self.render_frame()
    }

    /// Runs the pass for a control change already applied to `self`.
    ///
    /// When the pass fails, `restore` reverts the change so the controller
    /// keeps showing the last successful pass.
    fn apply_change(&mut self, restore: impl FnOnce(&mut Self)) -> ChartResult<()> {
        if let Err(err) = self.run_pass() {
            restore(self);
            warn!(%err, "render pass failed; control change reverted");
            return Err(err);
        }
        self.render_frame()
    }

    /// Rebuilds scales, ticks and marker bindings.
    ///
    /// Every stage runs on staged values; nothing is committed unless all of
    /// them succeed.
    fn run_pass(&mut self) -> ChartResult<()> {
        let Some(viewport) = self.container else {
            trace!("container not ready; deferring render");
            return Ok(());
        };

        if self.view.is_empty() {
            self.scales = None;
            self.ticks.clear();
            self.engine.clear();
            self.interaction.on_pointer_leave();
            trace!("empty record set; rendering empty state");
            return Ok(());
        }

        let ranges = self.config.pixel_ranges(viewport);
        let mut scales = build_scales(
            &self.view,
            self.mode,
            self.columns,
            ranges,
            self.config.marker_radius_px,
        )?;
        let x_ticks = generate_ticks(&scales.x, self.config.scatter_tick_count);
        let y_ticks = generate_ticks(&scales.y, self.config.scatter_tick_count);
        // Bind validates every projection before it touches a marker.
        let summary = self.engine.bind(&self.view, &mut scales, self.clock_ms)?;
        self.ticks.replace(Axis::X, x_ticks);
        self.ticks.replace(Axis::Y, y_ticks);
        self.scales = Some(scales);
        self.render_passes += 1;

        debug!(
            pass = self.render_passes,
            mode = ?self.mode,
            x_column = self.columns.x.key(),
            entered = summary.entered,
            updated = summary.updated,
            exiting = summary.exiting,
            "render pass"
        );
        Ok(())
    }

    /// Materializes the current state into a frame without touching it.
    #[must_use]
    pub fn build_frame(&self) -> Option<RenderFrame> {
        let viewport = self.container?;
        if self.scales.is_none() {
            return Some(RenderFrame::new(viewport));
        }
        Some(build_chart_frame(FrameInputs {
            viewport,
            ranges: self.config.pixel_ranges(viewport),
            marker_radius_px: self.config.marker_radius_px,
            ticks: &self.ticks,
            captions: &self.axis_captions(),
            engine: &self.engine,
            style: self.config.style,
        }))
    }

    fn render_frame(&mut self) -> ChartResult<()> {
        let Some(frame) = self.build_frame() else {
            return Ok(());
        };
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn config(&self) -> ChartConfig {
        self.config
    }

    #[must_use]
    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    #[must_use]
    pub fn columns(&self) -> SelectedColumns {
        self.columns
    }

    /// Canonical records as supplied by the host.
    #[must_use]
    pub fn records(&self) -> Option<&Arc<[TrackRecord]>> {
        self.records.as_ref()
    }

    /// Derived visualization view of the current records.
    #[must_use]
    pub fn view(&self) -> &[TrackRecord] {
        &self.view
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.container
    }

    #[must_use]
    pub fn is_container_ready(&self) -> bool {
        self.container.is_some()
    }

    #[must_use]
    pub fn scales(&self) -> Option<&ScalePair> {
        self.scales.as_ref()
    }

    #[must_use]
    pub fn ticks(&self) -> &AxisTicks {
        &self.ticks
    }

    #[must_use]
    pub fn render_engine(&self) -> &RenderEngine {
        &self.engine
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.engine.markers()
    }

    #[must_use]
    pub fn tooltip(&self) -> &Tooltip {
        self.engine.tooltip()
    }

    /// Last pointer position inside the container, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.interaction.cursor()
    }

    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    #[must_use]
    pub fn render_passes(&self) -> u64 {
        self.render_passes
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.engine.has_pending_transitions()
    }

    /// Options for the x and y selectors.
    ///
    /// Empty while there are no records, mirroring the hidden menu.
    #[must_use]
    pub fn column_options(&self) -> Vec<ColumnOption> {
        if self.view.is_empty() {
            return Vec::new();
        }
        NumericColumn::selectable()
            .iter()
            .map(|&column| ColumnOption {
                column,
                key: column.key(),
                label: column.display_name(),
            })
            .collect()
    }

    /// The y selector is only offered in scatter mode.
    #[must_use]
    pub fn y_selector_visible(&self) -> bool {
        self.mode == ChartMode::Scatter
    }

    #[must_use]
    pub fn axis_captions(&self) -> AxisCaptions {
        AxisCaptions {
            x: self.columns.x.display_name(),
            y: match self.mode {
                ChartMode::Scatter => self.columns.y.display_name(),
                ChartMode::Histogram => HISTOGRAM_Y_CAPTION,
            },
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

fn validate_viewport(viewport: Viewport) -> ChartResult<()> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(())
}

fn ensure_selectable(column: NumericColumn) -> ChartResult<()> {
    if !column.is_selectable() {
        return Err(ChartError::UnknownColumn(column.key().to_owned()));
    }
    Ok(())
}

fn canonicalize_view(view: Vec<TrackRecord>) -> Vec<TrackRecord> {
    let mut seen = HashSet::with_capacity(view.len());
    let original_count = view.len();
    let view: Vec<TrackRecord> = view
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect();
    if view.len() != original_count {
        warn!(
            dropped = original_count - view.len(),
            "dropped records with duplicate ids"
        );
    }
    view
}
