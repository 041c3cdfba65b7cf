//! track-chart: scatter/histogram visualization engine for audio track catalogs.
//!
//! Records are projected through mode-selected scales, labeled by generated
//! axis ticks and drawn as animated markers into backend-agnostic frames.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartController};
pub use error::{ChartError, ChartResult};
