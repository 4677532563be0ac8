//! GUI module - Event loop bootstrap, window bookkeeping and the eframe app

mod app;
mod runtime;
mod windows;

pub use runtime::{
    configure, current_config, global, wait_until_closed, Bootstrap, EguiRuntime, Readiness,
    RuntimeError, UiRuntime, UiTask,
};
pub use windows::{ChartWindow, WindowId, WindowTracker, Windows};
