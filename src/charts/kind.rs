//! Chart kind selection from short type codes.

use crate::figure::FigureError;
use std::fmt;
use std::str::FromStr;

/// Rendering mode of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Connected points, no markers.
    Line,
    /// Markers only.
    Scatter,
    /// Category frequency bars.
    Histogram,
}

impl ChartKind {
    /// Parse a case-insensitive code: "l", "s" or "h".
    pub fn from_code(code: &str) -> Result<Self, FigureError> {
        match code.to_lowercase().as_str() {
            "l" => Ok(ChartKind::Line),
            "s" => Ok(ChartKind::Scatter),
            "h" => Ok(ChartKind::Histogram),
            other => Err(FigureError::InvalidChartType(other.to_string())),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ChartKind::Line => "l",
            ChartKind::Scatter => "s",
            ChartKind::Histogram => "h",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
            ChartKind::Histogram => "histogram",
        };
        f.write_str(name)
    }
}

impl FromStr for ChartKind {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}
