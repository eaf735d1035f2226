//! Data Processor Module
//! Derives the two chart views from the facility table for the current
//! widget state.

use crate::data::loader::{records_from_frame, FacilityTable};
use crate::data::schema::{
    FacilityRecord, TownFacilities, DISTRICT, GUEST_HOUSES, HOTELS, REQUIRED_COLUMNS,
    RESTAURANTS, TOURISM_INDEX, TOWN,
};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Per-town facility totals for one district.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistrictBreakdown {
    pub district: String,
    pub towns: Vec<TownFacilities>,
}

impl DistrictBreakdown {
    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }

    /// Tallest stacked bar, used to size the y axis.
    pub fn max_total(&self) -> i64 {
        self.towns.iter().map(TownFacilities::total).max().unwrap_or(0)
    }
}

/// Rows whose Tourism Index meets the threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexView {
    pub threshold: i64,
    pub records: Vec<FacilityRecord>,
}

impl IndexView {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Handles filtering and grouping of the facility table.
pub struct DataProcessor;

impl DataProcessor {
    /// Sum hotels, restaurants and guest houses per town within `district`.
    ///
    /// An unknown district yields an empty breakdown.
    pub fn district_breakdown(
        table: &FacilityTable,
        district: &str,
    ) -> Result<DistrictBreakdown, ProcessorError> {
        let grouped = table
            .dataframe()
            .clone()
            .lazy()
            .filter(col(DISTRICT).eq(lit(district)))
            .group_by([col(TOWN)])
            .agg([
                col(HOTELS).sum(),
                col(RESTAURANTS).sum(),
                col(GUEST_HOUSES).sum(),
            ])
            .sort([TOWN], SortMultipleOptions::default())
            .collect()?;

        let towns = Self::town_facilities(&grouped)?;
        tracing::debug!(district, towns = towns.len(), "Computed district breakdown");

        Ok(DistrictBreakdown {
            district: district.to_string(),
            towns,
        })
    }

    /// Keep every row with `Tourism Index >= threshold`, in file order.
    pub fn index_view(table: &FacilityTable, threshold: i64) -> Result<IndexView, ProcessorError> {
        let filtered = table
            .dataframe()
            .clone()
            .lazy()
            .filter(col(TOURISM_INDEX).gt_eq(lit(threshold as f64)))
            .select(REQUIRED_COLUMNS.map(col))
            .collect()?;

        let records = records_from_frame(&filtered)?;
        tracing::debug!(threshold, rows = records.len(), "Computed index view");

        Ok(IndexView { threshold, records })
    }

    fn town_facilities(grouped: &DataFrame) -> Result<Vec<TownFacilities>, ProcessorError> {
        let town = grouped.column(TOWN)?.str()?;
        let hotels = grouped.column(HOTELS)?.i64()?;
        let restaurants = grouped.column(RESTAURANTS)?.i64()?;
        let guest_houses = grouped.column(GUEST_HOUSES)?.i64()?;

        Ok((0..grouped.height())
            .filter_map(|i| {
                Some(TownFacilities {
                    town: town.get(i)?.to_string(),
                    hotels: hotels.get(i).unwrap_or(0),
                    restaurants: restaurants.get(i).unwrap_or(0),
                    guest_houses: guest_houses.get(i).unwrap_or(0),
                })
            })
            .collect())
    }
}
