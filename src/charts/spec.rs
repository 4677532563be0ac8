//! Chart Construction Module
//! Turns a figure's configuration and series into a frozen, renderable chart.
//!
//! The result owns copies of everything it needs, so it can be moved to the
//! UI thread or handed to the static renderer while the figure keeps changing.

use crate::charts::ChartKind;
use crate::data::{FrequencyTable, SeriesData};
use crate::figure::{Figure, FigureError};
use indexmap::IndexSet;
use tracing::debug;

/// Legend name used for histogram traces without a name.
pub const DEFAULT_SERIES_NAME: &str = "Series";

/// One named XY trace, points in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct XyTrace {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// One named bar trace built from a categorical series.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTrace {
    pub name: String,
    pub table: FrequencyTable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    /// Line or scatter traces.
    Xy(Vec<XyTrace>),
    /// Histogram traces sharing one category axis, categories in
    /// first-seen order across all traces.
    Bars {
        categories: IndexSet<String>,
        traces: Vec<BarTrace>,
    },
}

/// Snapshot of a figure, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub body: ChartBody,
}

impl ChartSpec {
    /// Dispatch on the figure's type code and convert its series.
    ///
    /// Series whose shape does not fit the chart kind are skipped.
    pub fn build(figure: &Figure) -> Result<Self, FigureError> {
        let kind = ChartKind::from_code(figure.type_code())?;

        let body = match kind {
            ChartKind::Line | ChartKind::Scatter => Self::xy_body(figure),
            ChartKind::Histogram => Self::bar_body(figure),
        };

        Ok(Self {
            title: figure.title().to_string(),
            x_label: figure.x_label().to_string(),
            y_label: figure.y_label().to_string(),
            kind,
            body,
        })
    }

    fn xy_body(figure: &Figure) -> ChartBody {
        let traces = figure
            .series()
            .iter()
            .filter_map(|series| match series.data() {
                SeriesData::Numeric(points) => Some(XyTrace {
                    name: series.name().to_string(),
                    points: points.clone(),
                }),
                SeriesData::Categorical(_) => {
                    debug!(series = series.name(), "skipping categorical series on xy chart");
                    None
                }
            })
            .collect();
        ChartBody::Xy(traces)
    }

    fn bar_body(figure: &Figure) -> ChartBody {
        let mut categories: IndexSet<String> = IndexSet::new();
        let mut traces = Vec::new();

        for series in figure.series() {
            let SeriesData::Categorical(labels) = series.data() else {
                debug!(series = series.name(), "skipping numeric series on histogram");
                continue;
            };

            let table = FrequencyTable::from_labels(labels);
            for (category, _) in table.iter() {
                if !categories.contains(category) {
                    categories.insert(category.to_string());
                }
            }

            let name = if series.name().is_empty() {
                DEFAULT_SERIES_NAME.to_string()
            } else {
                series.name().to_string()
            };
            traces.push(BarTrace { name, table });
        }

        ChartBody::Bars { categories, traces }
    }

    /// Number of traces that will be drawn.
    pub fn trace_count(&self) -> usize {
        match &self.body {
            ChartBody::Xy(traces) => traces.len(),
            ChartBody::Bars { traces, .. } => traces.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trace_count() == 0
    }

    /// Position of `category` on the shared category axis.
    pub fn category_index(&self, category: &str) -> Option<usize> {
        match &self.body {
            ChartBody::Bars { categories, .. } => categories.get_index_of(category),
            ChartBody::Xy(_) => None,
        }
    }
}
