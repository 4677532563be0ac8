//! Configuration Module
//! Window, runtime and styling settings shared by the GUI runtime and the
//! static exporter. Every field has a default, so partial JSON is accepted.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for figure windows and exported images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Initial inner size of each figure window.
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// How long `show` waits for the GUI runtime to report ready.
    pub ready_timeout_ms: u64,
    /// Task queue polling interval of the UI loop.
    pub poll_interval_ms: u64,
    pub line_width: f32,
    pub marker_radius: f32,
    /// Fraction of a category slot covered by its bars.
    pub bar_width: f64,
    /// Keep the runtime's root viewport hidden.
    pub hide_root_window: bool,
    /// Pixel size of images written by `Figure::save`.
    pub export_size: [u32; 2],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            window_size: [800.0, 600.0],
            min_window_size: [320.0, 240.0],
            ready_timeout_ms: 5_000,
            poll_interval_ms: 100,
            line_width: 2.0,
            marker_radius: 3.0,
            bar_width: 0.8,
            hide_root_window: true,
            export_size: [1024, 768],
        }
    }
}

impl PlotConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
