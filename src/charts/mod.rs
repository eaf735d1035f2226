//! Charts module - Chart layout and rendering

mod plotter;
mod renderer;
pub mod treemap;

pub use plotter::{ChartPlotter, PALETTE, SERIES_COLORS};
pub use renderer::{safe_file_stem, RenderError, StaticChartRenderer};
pub use treemap::{TileRect, TreemapLayout};
