//! Tourism Explorer - Interactive Tourism Facilities Dashboard
//!
//! Loads the facilities table at startup and shows the dashboard window.

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use tourism_explorer::config::{CliArgs, DashboardConfig};
use tourism_explorer::data::DataLoader;
use tourism_explorer::gui::TourismApp;
use tourism_explorer::logging;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    logging::init_logger(args.verbose);

    let config = DashboardConfig::from_args(&args)?;
    tracing::debug!("Dashboard config: {:?}", config);

    // A missing or malformed table is fatal before any window opens
    let table = DataLoader::new()
        .load_csv(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([900.0, 600.0])
            .with_title(&config.title),
        ..Default::default()
    };

    let app_title = config.title.clone();
    eframe::run_native(
        &app_title,
        options,
        Box::new(move |cc| Ok(Box::new(TourismApp::new(cc, table, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard window failed: {e}"))
}
