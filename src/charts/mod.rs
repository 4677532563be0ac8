//! Charts module - Chart type dispatch, window drawing and static export

mod kind;
mod plotter;
mod renderer;
mod spec;

pub use kind::ChartKind;
pub use plotter::{ChartPlotter, PALETTE};
pub use renderer::StaticChartRenderer;
pub use spec::{BarTrace, ChartBody, ChartSpec, XyTrace, DEFAULT_SERIES_NAME};
