//! Figure Module
//! The user-facing figure: title, chart type, axis labels and series.

use crate::charts::{ChartSpec, StaticChartRenderer};
use crate::data::Series;
use crate::gui::{self, RuntimeError, UiRuntime, Windows};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FigureError {
    #[error("Unknown chart type: {0}")]
    InvalidChartType(String),
    #[error("GUI runtime error: {0}")]
    Runtime(#[from] RuntimeError),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// A chart description that can be shown in a window any number of times.
///
/// Construction never fails; the type code is only checked when the chart is
/// built by [`show`](Self::show), [`chart`](Self::chart) or [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct Figure {
    title: String,
    type_code: String,
    x_label: String,
    y_label: String,
    series: Vec<Series>,
}

impl Figure {
    /// Create a figure. `type_code` is "l" (line), "s" (scatter) or
    /// "h" (histogram), in either case.
    pub fn new(title: impl Into<String>, type_code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            type_code: type_code.into().to_lowercase(),
            x_label: String::new(),
            y_label: "Frequency".to_string(),
            series: Vec::new(),
        }
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.x_label = label.into();
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.y_label = label.into();
    }

    /// Append a numeric series of (x, y) points for line or scatter charts.
    pub fn add_numeric_series<I>(&mut self, name: impl Into<String>, points: I)
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.series.push(Series::numeric(name, points));
    }

    /// Append a categorical series for histograms.
    pub fn add_category_series<I, S>(&mut self, name: impl Into<String>, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.series.push(Series::categorical(name, labels));
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The stored (lowercased) chart type code.
    pub fn type_code(&self) -> &str {
        &self.type_code
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// Series in insertion order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Snapshot the current state into a renderable chart.
    pub fn chart(&self) -> Result<ChartSpec, FigureError> {
        ChartSpec::build(self)
    }

    /// Open a new window showing the figure as it is now.
    ///
    /// Starts the GUI runtime on first use. Returns once the window request
    /// has been queued; later changes to the figure do not affect it.
    pub fn show(&self) -> Result<(), FigureError> {
        let chart = self.chart()?;
        Self::submit(gui::global(), chart)
    }

    /// Like [`show`](Self::show), against a specific runtime.
    pub fn show_on<R>(&self, runtime: &R) -> Result<(), FigureError>
    where
        R: UiRuntime + ?Sized,
    {
        let chart = self.chart()?;
        Self::submit(runtime, chart)
    }

    fn submit<R>(runtime: &R, chart: ChartSpec) -> Result<(), FigureError>
    where
        R: UiRuntime + ?Sized,
    {
        debug!(
            title = %chart.title,
            kind = %chart.kind,
            traces = chart.trace_count(),
            "queueing figure window"
        );
        runtime.submit(Box::new(move |windows: &mut Windows| {
            windows.open(chart);
        }))?;
        Ok(())
    }

    /// Render the figure to PNG bytes at the configured export size.
    pub fn render_png(&self) -> Result<Vec<u8>, FigureError> {
        let chart = self.chart()?;
        let config = gui::current_config();
        let [width, height] = config.export_size;
        StaticChartRenderer::render_png(&chart, &config, width, height)
    }

    /// Write the figure to a PNG file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FigureError> {
        let bytes = self.render_png()?;
        std::fs::write(path.as_ref(), bytes)?;
        debug!(path = %path.as_ref().display(), "saved figure");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let fig = Figure::new("Title", "L");
        assert_eq!(fig.title(), "Title");
        assert_eq!(fig.type_code(), "l");
        assert_eq!(fig.x_label(), "");
        assert_eq!(fig.y_label(), "Frequency");
        assert!(fig.series().is_empty());
    }

    #[test]
    fn labels_overwrite() {
        let mut fig = Figure::new("t", "s");
        fig.set_x_label("x");
        fig.set_x_label("time");
        fig.set_y_label("");
        assert_eq!(fig.x_label(), "time");
        assert_eq!(fig.y_label(), "");
    }

    #[test]
    fn series_are_appended_in_order() {
        let mut fig = Figure::new("t", "l");
        fig.add_numeric_series("a", [(0.0, 1.0)]);
        fig.add_category_series("b", ["x"]);
        fig.add_numeric_series("a", [(2.0, 3.0)]);

        let names: Vec<&str> = fig.series().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
    }

    #[test]
    fn invalid_type_is_accepted_until_built() {
        let fig = Figure::new("t", "Q");
        assert_eq!(fig.type_code(), "q");
        assert!(matches!(fig.chart(), Err(FigureError::InvalidChartType(_))));
        assert!(matches!(fig.render_png(), Err(FigureError::InvalidChartType(_))));
    }
}
