mod animation;
mod frame;
mod marker_engine;
mod null_renderer;
mod primitives;
mod style;

pub use animation::{Ease, MarkerGeometry, MarkerPhase, Transition, TransitionTiming};
pub use frame::RenderFrame;
pub use marker_engine::{BindSummary, Marker, RenderEngine};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use style::ChartStyle;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code stays
/// isolated from scale, layout and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
