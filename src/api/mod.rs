mod axis_ticks;
mod chart_config;
mod controller;
mod frame_builder;
mod snapshot;

pub use axis_ticks::{Axis, AxisTicks, Tick, format_tick_label, generate_ticks};
pub use chart_config::ChartConfig;
pub use controller::{AxisCaptions, ChartController, ColumnOption, HISTOGRAM_Y_CAPTION};
pub use snapshot::ChartSnapshot;
