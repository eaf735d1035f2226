//! Stats module - summary statistics for the dashboard

mod summary;

pub use summary::IndexSummary;
