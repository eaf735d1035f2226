//! Tourism Explorer - interactive dashboard of tourism facilities per town.
//!
//! Loads a facilities CSV once, then derives a per-town breakdown for the
//! selected district and a Tourism Index view for the chosen minimum index.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod stats;
