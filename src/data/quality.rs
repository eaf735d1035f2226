//! Data quality audit
//! The facility table is trusted as-is; this only flags rows that break the
//! assumed invariants so an operator can see them in the log.

use crate::data::schema::{FacilityRecord, CAFES, GUEST_HOUSES, HOTELS, RESTAURANTS, TOURISM_INDEX};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataQualityReport {
    /// (column, number of negative values)
    pub negative_values: Vec<(&'static str, usize)>,
    /// (district, town, occurrences) for towns listed more than once
    pub duplicate_towns: Vec<(String, String, usize)>,
}

impl DataQualityReport {
    pub fn from_records(records: &[FacilityRecord]) -> Self {
        let columns: [(&'static str, fn(&FacilityRecord) -> bool); 5] = [
            (HOTELS, |r| r.hotels < 0),
            (RESTAURANTS, |r| r.restaurants < 0),
            (GUEST_HOUSES, |r| r.guest_houses < 0),
            (CAFES, |r| r.cafes < 0),
            (TOURISM_INDEX, |r| r.tourism_index < 0.0),
        ];

        let negative_values = columns
            .iter()
            .filter_map(|(name, is_negative)| {
                let count = records.iter().filter(|&r| is_negative(r)).count();
                (count > 0).then_some((*name, count))
            })
            .collect();

        let mut seen: HashMap<(&str, &str), usize> = HashMap::new();
        for r in records {
            *seen.entry((r.district.as_str(), r.town.as_str())).or_default() += 1;
        }
        let mut duplicate_towns: Vec<(String, String, usize)> = seen
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|((d, t), n)| (d.to_string(), t.to_string(), n))
            .collect();
        duplicate_towns.sort();

        Self {
            negative_values,
            duplicate_towns,
        }
    }

    pub fn log_warnings(&self) {
        for (column, count) in &self.negative_values {
            tracing::warn!(column, count, "Negative values in column");
        }
        for (district, town, count) in &self.duplicate_towns {
            tracing::warn!(
                district = district.as_str(),
                town = town.as_str(),
                count,
                "Town listed more than once; its rows will be summed"
            );
        }
    }
}
