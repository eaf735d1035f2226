//! Data module - CSV loading and view derivation

mod loader;
mod processor;
pub mod quality;
pub mod schema;

pub use loader::{DataLoader, FacilityTable, IndexBounds, LoaderError};
pub use processor::{DataProcessor, DistrictBreakdown, IndexView, ProcessorError};
pub use schema::{FacilityRecord, TownFacilities};
