//! Tourism Index summary for the filtered view.

use crate::data::IndexView;
use statrs::statistics::{Data, Distribution, Median};
use std::collections::HashSet;

/// Descriptive statistics of Tourism Index over the towns currently shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexSummary {
    pub towns: usize,
    pub districts: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
}

impl IndexSummary {
    pub fn from_view(view: &IndexView) -> Self {
        let values: Vec<f64> = view
            .records
            .iter()
            .map(|r| r.tourism_index)
            .filter(|v| !v.is_nan())
            .collect();

        let districts = view
            .records
            .iter()
            .map(|r| r.district.as_str())
            .collect::<HashSet<_>>()
            .len();

        if values.is_empty() {
            return Self {
                towns: view.len(),
                districts,
                ..Self::default()
            };
        }

        let data = Data::new(values);
        Self {
            towns: view.len(),
            districts,
            mean: data.mean().filter(|v| v.is_finite()),
            median: Some(data.median()).filter(|v| v.is_finite()),
            std_dev: data.std_dev().filter(|v| v.is_finite()),
        }
    }
}
