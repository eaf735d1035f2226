//! CSV Data Loader Module
//! Loads the facility table once at startup using Polars.

use crate::data::quality::DataQualityReport;
use crate::data::schema::{
    FacilityRecord, CAFES, COUNT_COLUMNS, DISTRICT, GUEST_HOUSES, HOTELS, REQUIRED_COLUMNS,
    RESTAURANTS, TOURISM_INDEX, TOWN,
};
use polars::prelude::*;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Failed to read CSV data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Column '{column}' has {count} empty value(s)")]
    NullValues { column: String, count: usize },
    #[error("Column '{column}' contains a value that is not {expected}: {source}")]
    InvalidValue {
        column: String,
        expected: &'static str,
        source: PolarsError,
    },
}

/// Integer floor of the smallest and largest Tourism Index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBounds {
    pub min: i64,
    pub max: i64,
}

impl IndexBounds {
    /// Clamp a requested threshold into the bounds.
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

/// The loaded, typed facility table. Immutable once built.
#[derive(Debug, Clone)]
pub struct FacilityTable {
    df: DataFrame,
    source: Option<PathBuf>,
}

impl FacilityTable {
    /// Get a reference to the underlying DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Distinct District values in order of first appearance.
    pub fn districts(&self) -> Vec<String> {
        self.df
            .column(DISTRICT)
            .ok()
            .and_then(|col| col.as_materialized_series().unique_stable().ok())
            .map(|unique| string_values(&unique))
            .unwrap_or_default()
    }

    /// Slider bounds: floor of min and max Tourism Index.
    pub fn index_bounds(&self) -> Option<IndexBounds> {
        let ca = self.df.column(TOURISM_INDEX).ok()?.f64().ok()?;
        let min = ca.min()?;
        let max = ca.max()?;
        Some(IndexBounds {
            min: min.floor() as i64,
            max: max.floor() as i64,
        })
    }

    /// All rows as typed records, in file order.
    pub fn records(&self) -> Result<Vec<FacilityRecord>, PolarsError> {
        records_from_frame(&self.df)
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    infer_schema_length: usize,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            infer_schema_length: 10000,
        }
    }

    /// Load the facility table from a CSV file.
    pub fn load_csv(&self, file_path: &Path) -> Result<FacilityTable, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        tracing::debug!(path = %file_path.display(), "Reading CSV file");

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_length))
            .finish()?
            .collect()?;

        let mut table = Self::prepare(df)?;
        table.source = Some(file_path.to_path_buf());
        Self::report_loaded(&table);
        Ok(table)
    }

    /// Load the facility table from any CSV source, e.g. bytes held in memory.
    pub fn load_from_reader<R: Read>(&self, mut reader: R) -> Result<FacilityTable, LoaderError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_length))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        let table = Self::prepare(df)?;
        Self::report_loaded(&table);
        Ok(table)
    }

    /// Check the header and cast every required column to its expected type.
    /// Extra columns are dropped. Only District and Town must be filled in;
    /// empty counts and index values stay null.
    fn prepare(df: DataFrame) -> Result<FacilityTable, LoaderError> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| df.get_column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingColumns(missing));
        }

        let mut df = df.select(REQUIRED_COLUMNS)?;

        for name in [DISTRICT, TOWN] {
            let count = df.column(name)?.null_count();
            if count > 0 {
                return Err(LoaderError::NullValues {
                    column: name.to_string(),
                    count,
                });
            }
        }

        for name in COUNT_COLUMNS.into_iter().chain([TOURISM_INDEX]) {
            let count = df.column(name)?.null_count();
            if count > 0 {
                tracing::warn!(column = name, count, "Empty values in column");
            }
        }

        for name in [DISTRICT, TOWN] {
            let cast = df.column(name)?.cast(&DataType::String)?;
            df.with_column(cast)?;
        }

        for name in COUNT_COLUMNS {
            let column = df.column(name)?;
            if column.dtype().is_float() {
                Self::reject_fractions(name, column)?;
            }
            let cast = column
                .strict_cast(&DataType::Int64)
                .map_err(|source| LoaderError::InvalidValue {
                    column: name.to_string(),
                    expected: "an integer",
                    source,
                })?;
            df.with_column(cast)?;
        }

        let index = df
            .column(TOURISM_INDEX)?
            .strict_cast(&DataType::Float64)
            .map_err(|source| LoaderError::InvalidValue {
                column: TOURISM_INDEX.to_string(),
                expected: "a number",
                source,
            })?;
        df.with_column(index)?;

        Ok(FacilityTable { df, source: None })
    }

    /// Float-to-integer casts truncate silently, so whole numbers are checked first.
    fn reject_fractions(name: &str, column: &Column) -> Result<(), LoaderError> {
        let values = column.cast(&DataType::Float64)?;
        let fractional = values.f64()?.into_iter().flatten().find(|v| v.fract() != 0.0);
        match fractional {
            Some(value) => Err(LoaderError::InvalidValue {
                column: name.to_string(),
                expected: "an integer",
                source: PolarsError::ComputeError(
                    format!("value {value} has a fractional part").into(),
                ),
            }),
            None => Ok(()),
        }
    }

    fn report_loaded(table: &FacilityTable) {
        tracing::info!(
            rows = table.row_count(),
            districts = table.districts().len(),
            "Loaded facility table"
        );

        match table.records() {
            Ok(records) => DataQualityReport::from_records(&records).log_warnings(),
            Err(e) => tracing::warn!("Skipped data quality audit: {}", e),
        }
    }
}

/// Extract typed records from a frame holding the required columns.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<FacilityRecord>, PolarsError> {
    let district = df.column(DISTRICT)?.str()?;
    let town = df.column(TOWN)?.str()?;
    let hotels = df.column(HOTELS)?.i64()?;
    let restaurants = df.column(RESTAURANTS)?.i64()?;
    let guest_houses = df.column(GUEST_HOUSES)?.i64()?;
    let cafes = df.column(CAFES)?.i64()?;
    let index = df.column(TOURISM_INDEX)?.f64()?;

    let records = (0..df.height())
        .map(|i| FacilityRecord {
            district: district.get(i).unwrap_or_default().to_string(),
            town: town.get(i).unwrap_or_default().to_string(),
            hotels: hotels.get(i).unwrap_or(0),
            restaurants: restaurants.get(i).unwrap_or(0),
            guest_houses: guest_houses.get(i).unwrap_or(0),
            cafes: cafes.get(i).unwrap_or(0),
            tourism_index: index.get(i).unwrap_or(f64::NAN),
        })
        .collect();

    Ok(records)
}

fn string_values(series: &Series) -> Vec<String> {
    series
        .str()
        .map(|ca| ca.into_iter().flatten().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
District,Town,Total number of hotels,Total number of restaurants,Total number of guest houses,Total number of cafes,Tourism Index
A,X,2,1,0,4,5
A,Y,0,3,1,2,9
B,Z,1,1,1,0,2.5
";

    #[test]
    fn loads_typed_table() {
        let table = DataLoader::new().load_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.dataframe().column(HOTELS).unwrap().dtype(), &DataType::Int64);
        assert_eq!(
            table.dataframe().column(TOURISM_INDEX).unwrap().dtype(),
            &DataType::Float64
        );
    }

    #[test]
    fn districts_keep_first_appearance_order() {
        let csv = "\
District,Town,Total number of hotels,Total number of restaurants,Total number of guest houses,Total number of cafes,Tourism Index
South,S1,1,1,1,1,1
North,N1,1,1,1,1,1
South,S2,1,1,1,1,1
";
        let table = DataLoader::new().load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.districts(), vec!["South", "North"]);
    }

    #[test]
    fn index_bounds_are_floored() {
        let table = DataLoader::new().load_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.index_bounds(), Some(IndexBounds { min: 2, max: 9 }));
    }

    #[test]
    fn missing_columns_are_all_listed() {
        let csv = "District,Town,Total number of hotels,Tourism Index\nA,X,1,3\n";
        let err = DataLoader::new().load_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            LoaderError::MissingColumns(cols) => assert_eq!(
                cols,
                vec![RESTAURANTS, GUEST_HOUSES, CAFES]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        let csv = "\
District,Town,Total number of hotels,Total number of restaurants,Total number of guest houses,Total number of cafes,Tourism Index
A,X,many,1,0,0,5
";
        let err = DataLoader::new().load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidValue { ref column, .. } if column == HOTELS));
    }

    #[test]
    fn fractional_count_is_rejected() {
        let csv = "\
District,Town,Total number of hotels,Total number of restaurants,Total number of guest houses,Total number of cafes,Tourism Index
A,X,2.5,1,0,0,5
A,Y,1,1,0,0,6
";
        let err = DataLoader::new().load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::InvalidValue { ref column, expected: "an integer", .. } if column == HOTELS
        ));
        assert!(err.to_string().contains("2.5"));
    }

    #[test]
    fn whole_float_counts_are_accepted() {
        let csv = "\
District,Town,Total number of hotels,Total number of restaurants,Total number of guest houses,Total number of cafes,Tourism Index
A,X,2.0,1,0,0,5
";
        let table = DataLoader::new().load_from_reader(csv.as_bytes()).unwrap();
        let records = table.records().unwrap();
        assert_eq!(records[0].hotels, 2);
    }

    #[test]
    fn empty_town_is_rejected() {
        let csv = "\
District,Town,Total number of hotels,Total number of restaurants,Total number of guest houses,Total number of cafes,Tourism Index
A,X,1,1,0,0,5
A,,1,1,0,0,6
";
        let err = DataLoader::new().load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::NullValues { ref column, count: 1 } if column == TOWN));
    }

    #[test]
    fn empty_count_and_index_cells_load_as_null() {
        let csv = "\
District,Town,Total number of hotels,Total number of restaurants,Total number of guest houses,Total number of cafes,Tourism Index
A,X,2,1,0,,5
A,Y,1,,1,2,
";
        let table = DataLoader::new().load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 2);

        let df = table.dataframe();
        assert_eq!(df.column(CAFES).unwrap().null_count(), 1);
        assert_eq!(df.column(TOURISM_INDEX).unwrap().null_count(), 1);
        assert_eq!(table.index_bounds(), Some(IndexBounds { min: 5, max: 5 }));

        let records = table.records().unwrap();
        assert_eq!(records[0].cafes, 0);
        assert_eq!(records[1].restaurants, 0);
        assert!(records[1].tourism_index.is_nan());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = DataLoader::new()
            .load_csv(Path::new("/definitely/not/here/Tourism.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn records_follow_file_order() {
        let table = DataLoader::new().load_from_reader(SAMPLE.as_bytes()).unwrap();
        let towns: Vec<String> = table.records().unwrap().into_iter().map(|r| r.town).collect();
        assert_eq!(towns, vec!["X", "Y", "Z"]);
    }
}
