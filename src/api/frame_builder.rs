use crate::core::{PixelRanges, Viewport};
use crate::render::{
    ChartStyle, LinePrimitive, RenderEngine, RenderFrame, TextHAlign, TextPrimitive,
};

use super::{Axis, AxisCaptions, AxisTicks};

/// Inputs of one frame materialization.
pub(super) struct FrameInputs<'a> {
    pub viewport: Viewport,
    pub ranges: PixelRanges,
    pub marker_radius_px: f64,
    pub ticks: &'a AxisTicks,
    pub captions: &'a AxisCaptions,
    pub engine: &'a RenderEngine,
    pub style: ChartStyle,
}

/// Lays out axes, ticks, captions, markers and tooltip into a frame.
pub(super) fn build_chart_frame(inputs: FrameInputs<'_>) -> RenderFrame {
    let FrameInputs {
        viewport,
        ranges,
        marker_radius_px,
        ticks,
        captions,
        engine,
        style,
    } = inputs;

    let mut frame = RenderFrame::new(viewport);
    let axis_y = ranges.y.0 + marker_radius_px;
    let axis_x = ranges.x.0 - marker_radius_px;
    let label_gap = style.tick_length_px + style.label_font_size_px;

    frame.lines.push(LinePrimitive::new(
        axis_x,
        axis_y,
        ranges.x.1 + marker_radius_px,
        axis_y,
        style.axis_stroke_width,
        style.axis_color,
    ));
    frame.lines.push(LinePrimitive::new(
        axis_x,
        axis_y,
        axis_x,
        ranges.y.1 - marker_radius_px,
        style.axis_stroke_width,
        style.axis_color,
    ));

    for tick in ticks.get(Axis::X) {
        frame.lines.push(LinePrimitive::new(
            tick.position_px,
            axis_y,
            tick.position_px,
            axis_y + style.tick_length_px,
            style.axis_stroke_width,
            style.axis_color,
        ));
        frame.texts.push(TextPrimitive::new(
            tick.label.clone(),
            tick.position_px,
            axis_y + label_gap,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Center,
        ));
    }
    for tick in ticks.get(Axis::Y) {
        frame.lines.push(LinePrimitive::new(
            axis_x - style.tick_length_px,
            tick.position_px,
            axis_x,
            tick.position_px,
            style.axis_stroke_width,
            style.axis_color,
        ));
        frame.texts.push(TextPrimitive::new(
            tick.label.clone(),
            axis_x - style.tick_length_px - 2.0,
            tick.position_px,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Right,
        ));
    }

    frame.texts.push(TextPrimitive::new(
        captions.x,
        (ranges.x.0 + ranges.x.1) * 0.5,
        axis_y + label_gap * 2.0,
        style.label_font_size_px,
        style.label_color,
        TextHAlign::Center,
    ));
    frame.texts.push(TextPrimitive::new(
        captions.y,
        axis_x,
        (ranges.y.1 - label_gap).max(style.label_font_size_px),
        style.label_font_size_px,
        style.label_color,
        TextHAlign::Left,
    ));

    engine.append_primitives(&mut frame, style);
    frame
}
