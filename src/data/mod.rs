//! Data module - Series storage and category counting

mod frequency;
mod series;

pub use frequency::FrequencyTable;
pub use series::{Series, SeriesData};
