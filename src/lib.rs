//! QuickPlot - line, scatter and histogram figures in native windows.
//!
//! A [`Figure`] holds a title, a chart type code, axis labels and named
//! series. [`Figure::show`] opens the figure in its own window, starting the
//! GUI runtime on a background thread the first time it is needed.
//!
//! ```no_run
//! use quickplot::Figure;
//!
//! let mut fig = Figure::new("Sample Plot", "l");
//! fig.set_x_label("X Axis");
//! fig.set_y_label("Y Axis");
//! fig.add_numeric_series("Series 1", [(0.0, 1.0), (1.0, 2.0)]);
//! fig.show()?;
//! quickplot::wait_until_closed();
//! # Ok::<(), quickplot::FigureError>(())
//! ```

pub mod charts;
pub mod config;
pub mod data;
pub mod figure;
pub mod gui;

pub use charts::{BarTrace, ChartBody, ChartKind, ChartSpec, XyTrace};
pub use config::{ConfigError, PlotConfig};
pub use data::{FrequencyTable, Series, SeriesData};
pub use figure::{Figure, FigureError};
pub use gui::{configure, wait_until_closed, RuntimeError, UiRuntime, UiTask, Windows};
