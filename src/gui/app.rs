//! Tourism Explorer Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{DataProcessor, FacilityTable};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;

const EXPORT_WIDTH: u32 = 1400;
const EXPORT_HEIGHT: u32 = 900;

/// Main application window.
pub struct TourismApp {
    table: FacilityTable,
    title: String,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl TourismApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        table: FacilityTable,
        config: &DashboardConfig,
    ) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.data_path = table.source_path().map(|p| p.to_path_buf());
        control_panel.row_count = table.row_count();
        control_panel.set_options(
            table.districts(),
            table.index_bounds(),
            config.default_min_index,
        );

        let mut app = Self {
            table,
            title: config.title.clone(),
            control_panel,
            chart_viewer: ChartViewer::new(),
        };
        app.refresh_views();
        app
    }

    /// Recompute both views from the in-memory table for the current widgets.
    fn refresh_views(&mut self) {
        let settings = &self.control_panel.settings;
        let breakdown = DataProcessor::district_breakdown(&self.table, &settings.selected_district);
        let index_view = DataProcessor::index_view(&self.table, settings.min_tourism_index);

        match (breakdown, index_view) {
            (Ok(breakdown), Ok(index_view)) => {
                let status = format!(
                    "{}: {} towns | Index >= {}: {} towns",
                    breakdown.district,
                    breakdown.towns.len(),
                    index_view.threshold,
                    index_view.len()
                );
                self.chart_viewer.set_views(breakdown, index_view);
                self.control_panel.set_status(&status);
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("Failed to compute views: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle PNG export - render both charts into a user-chosen folder
    fn handle_export_png(&mut self) {
        let Some(dir) = rfd::FileDialog::new()
            .set_title("Choose export folder")
            .pick_folder()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::export_dashboard(
            &self.chart_viewer.breakdown,
            &self.chart_viewer.index_view,
            &dir,
            EXPORT_WIDTH,
            EXPORT_HEIGHT,
        ) {
            Ok(paths) => {
                self.control_panel
                    .set_status(&format!("Exported {} charts to {}", paths.len(), dir.display()));
                if let Err(e) = open::that(&dir) {
                    tracing::warn!("Could not open export folder: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("PNG export failed: {}", e);
                self.control_panel
                    .set_status(&format!("Error: export failed: {}", e));
            }
        }
    }
}

impl eframe::App for TourismApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::FiltersChanged => self.refresh_views(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.title);
        });
    }
}
