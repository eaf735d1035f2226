//! Control Panel Widget
//! Left side panel with the district dropdown, minimum-index slider and export.

use crate::data::IndexBounds;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Current widget state
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserSettings {
    pub selected_district: String,
    pub min_tourism_index: i64,
}

/// Left side control panel with the two view filters.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub districts: Vec<String>,
    pub bounds: Option<IndexBounds>,
    pub data_path: Option<PathBuf>,
    pub row_count: usize,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            districts: Vec::new(),
            bounds: None,
            data_path: None,
            row_count: 0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the widgets from the loaded table. The first district is
    /// preselected and the slider starts at `default_min_index` clamped
    /// into the index bounds.
    pub fn set_options(
        &mut self,
        districts: Vec<String>,
        bounds: Option<IndexBounds>,
        default_min_index: i64,
    ) {
        self.settings.selected_district = districts.first().cloned().unwrap_or_default();
        self.settings.min_tourism_index = bounds
            .map(|b| b.clamp(default_min_index))
            .unwrap_or(default_min_index);
        self.districts = districts;
        self.bounds = bounds;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏨 Tourism Explorer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Facilities & Tourism Index")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .data_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "In-memory data".to_string());
                ui.label(RichText::new(path_text).size(12.0));
                ui.label(
                    RichText::new(format!(
                        "{} towns, {} districts",
                        self.row_count,
                        self.districts.len()
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("🔧 Filters").size(14.0).strong());
        ui.add_space(8.0);

        ui.label("Choose a district to filter");
        ComboBox::from_id_salt("district")
            .width(ui.available_width() - 10.0)
            .selected_text(&self.settings.selected_district)
            .show_ui(ui, |ui| {
                for district in &self.districts {
                    if ui
                        .selectable_label(self.settings.selected_district == *district, district)
                        .clicked()
                        && self.settings.selected_district != *district
                    {
                        self.settings.selected_district = district.clone();
                        action = ControlPanelAction::FiltersChanged;
                    }
                }
            });

        ui.add_space(12.0);

        ui.label("Select the minimum Tourism Index to display");
        match self.bounds {
            Some(bounds) => {
                let response = ui.add(egui::Slider::new(
                    &mut self.settings.min_tourism_index,
                    bounds.min..=bounds.max,
                ));
                if response.changed() {
                    action = ControlPanelAction::FiltersChanged;
                }
            }
            None => {
                ui.label(RichText::new("No Tourism Index values").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportPng;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    FiltersChanged,
    ExportPng,
}
