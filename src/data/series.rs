//! Series Module
//! Named data series, either numeric XY points or raw category labels.

/// Payload of a series. Exactly one shape per series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    /// Ordered (x, y) points, drawn in insertion order.
    Numeric(Vec<[f64; 2]>),
    /// Raw category observations, possibly repeated.
    Categorical(Vec<String>),
}

/// One named series owned by a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    data: SeriesData,
}

impl Series {
    /// Create a numeric series from (x, y) pairs.
    pub fn numeric<I>(name: impl Into<String>, points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            name: name.into(),
            data: SeriesData::Numeric(points.into_iter().map(|(x, y)| [x, y]).collect()),
        }
    }

    /// Create a categorical series from label observations.
    pub fn categorical<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            data: SeriesData::Categorical(labels.into_iter().map(Into::into).collect()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &SeriesData {
        &self.data
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, SeriesData::Numeric(_))
    }

    /// Points of a numeric series, `None` for categorical ones.
    pub fn points(&self) -> Option<&[[f64; 2]]> {
        match &self.data {
            SeriesData::Numeric(points) => Some(points),
            SeriesData::Categorical(_) => None,
        }
    }

    /// Labels of a categorical series, `None` for numeric ones.
    pub fn labels(&self) -> Option<&[String]> {
        match &self.data {
            SeriesData::Numeric(_) => None,
            SeriesData::Categorical(labels) => Some(labels),
        }
    }

    /// Number of points or label observations.
    pub fn len(&self) -> usize {
        match &self.data {
            SeriesData::Numeric(points) => points.len(),
            SeriesData::Categorical(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
