//! Facility table schema
//! Column names as they appear in the CSV header, and typed row views.

pub const DISTRICT: &str = "District";
pub const TOWN: &str = "Town";
pub const HOTELS: &str = "Total number of hotels";
pub const RESTAURANTS: &str = "Total number of restaurants";
pub const GUEST_HOUSES: &str = "Total number of guest houses";
pub const CAFES: &str = "Total number of cafes";
pub const TOURISM_INDEX: &str = "Tourism Index";

/// Every column the loader requires, in header order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    DISTRICT,
    TOWN,
    HOTELS,
    RESTAURANTS,
    GUEST_HOUSES,
    CAFES,
    TOURISM_INDEX,
];

/// Integer facility columns.
pub const COUNT_COLUMNS: [&str; 4] = [HOTELS, RESTAURANTS, GUEST_HOUSES, CAFES];

/// Columns stacked in the district bar chart.
pub const STACKED_COLUMNS: [&str; 3] = [HOTELS, RESTAURANTS, GUEST_HOUSES];

/// One row of the facility table.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRecord {
    pub district: String,
    pub town: String,
    pub hotels: i64,
    pub restaurants: i64,
    pub guest_houses: i64,
    pub cafes: i64,
    pub tourism_index: f64,
}

/// Per-town totals shown as one stacked bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TownFacilities {
    pub town: String,
    pub hotels: i64,
    pub restaurants: i64,
    pub guest_houses: i64,
}

impl TownFacilities {
    pub fn total(&self) -> i64 {
        self.hotels + self.restaurants + self.guest_houses
    }

    /// Values in stacking order, paired with their series label.
    pub fn series(&self) -> [(&'static str, i64); 3] {
        [
            (HOTELS, self.hotels),
            (RESTAURANTS, self.restaurants),
            (GUEST_HOUSES, self.guest_houses),
        ]
    }
}
