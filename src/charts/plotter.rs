//! Chart Plotter Module
//! Creates the interactive dashboard charts using egui_plot and the egui painter.

use crate::charts::treemap::{TileRect, TreemapLayout};
use crate::data::schema::{CAFES, GUEST_HOUSES, HOTELS, RESTAURANTS, TOURISM_INDEX};
use crate::data::{DistrictBreakdown, IndexView};
use crate::stats::IndexSummary;
use egui::{Align2, Color32, FontId, RichText, Sense, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

/// Colors for the stacked facility series
pub const SERIES_COLORS: [Color32; 3] = [
    Color32::from_rgb(99, 110, 250), // Hotels
    Color32::from_rgb(239, 85, 59),  // Restaurants
    Color32::from_rgb(0, 204, 150),  // Guest houses
];

/// Color palette for districts
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const TREEMAP_HEADER: f64 = 18.0;
const TREEMAP_PADDING: f64 = 2.0;

/// Draws the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a district by its position in the layout.
    pub fn get_district_color(district_index: usize) -> Color32 {
        PALETTE[district_index % PALETTE.len()]
    }

    /// Draw the stacked bar chart of facilities per town.
    /// X-axis: towns, Y-axis: number of facilities, one stacked series per facility type.
    pub fn draw_stacked_bar_chart(ui: &mut egui::Ui, breakdown: &DistrictBreakdown, height: f32) {
        let towns: Vec<String> = breakdown.towns.iter().map(|t| t.town.clone()).collect();
        let tick_count = towns.len();

        let mut series: Vec<BarChart> = Vec::with_capacity(SERIES_COLORS.len());
        for (series_idx, (label, color)) in [HOTELS, RESTAURANTS, GUEST_HOUSES]
            .into_iter()
            .zip(SERIES_COLORS)
            .enumerate()
        {
            let bars: Vec<Bar> = breakdown
                .towns
                .iter()
                .enumerate()
                .map(|(i, town)| {
                    Bar::new(i as f64, town.series()[series_idx].1 as f64)
                        .name(&town.town)
                        .width(0.6)
                })
                .collect();

            let mut chart = BarChart::new(bars)
                .name(label)
                .color(color)
                .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
                    format!("{}\n{}: {}", bar.name, label, bar.value)
                }));

            let below: Vec<&BarChart> = series.iter().collect();
            if !below.is_empty() {
                chart = chart.stack_on(&below);
            }
            series.push(chart);
        }

        Plot::new(format!("stacked_bar_{}", breakdown.district))
            .height(height)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .include_y(breakdown.max_total() as f64 * 1.1)
            .x_axis_label("Town")
            .y_axis_label("Number of Facilities")
            .x_grid_spacer(move |_input| {
                (0..tick_count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                towns.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for chart in series {
                    plot_ui.bar_chart(chart);
                }
            });

        if breakdown.is_empty() {
            ui.label(RichText::new("No towns to display").italics().color(Color32::GRAY));
        }
    }

    /// Draw the District > Town treemap of Tourism Index with hover annotations.
    pub fn draw_treemap(ui: &mut egui::Ui, view: &IndexView, height: f32) {
        let size = egui::vec2(ui.available_width(), height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let bounds = TileRect::new(
            rect.min.x as f64,
            rect.min.y as f64,
            rect.width() as f64,
            rect.height() as f64,
        );
        let layout = TreemapLayout::compute(view, bounds, TREEMAP_HEADER, TREEMAP_PADDING);
        let painter = ui.painter_at(rect);

        if layout.is_empty() {
            painter.rect_stroke(rect, 4.0, Stroke::new(1.0, Color32::GRAY));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No towns to display",
                FontId::proportional(14.0),
                Color32::GRAY,
            );
            return;
        }

        let hovered = response
            .hover_pos()
            .and_then(|pos| layout.town_at(pos.x as f64, pos.y as f64));

        for (i, district) in layout.districts.iter().enumerate() {
            let color = Self::get_district_color(i);
            let district_rect = to_egui_rect(district.rect);
            painter.rect_filled(district_rect, 2.0, color.gamma_multiply(0.35));
            painter.rect_stroke(district_rect, 2.0, Stroke::new(1.0, ui.visuals().extreme_bg_color));
            Self::paint_label(
                &painter,
                district_rect,
                &district.name,
                13.0,
                ui.visuals().strong_text_color(),
            );

            for town in &district.towns {
                let town_rect = to_egui_rect(town.rect);
                let is_hovered = hovered
                    .map(|(_, h)| std::ptr::eq(h, town))
                    .unwrap_or(false);
                let fill = if is_hovered {
                    color
                } else {
                    color.gamma_multiply(0.8)
                };
                painter.rect_filled(town_rect, 2.0, fill);
                if is_hovered {
                    painter.rect_stroke(town_rect, 2.0, Stroke::new(2.0, Color32::WHITE));
                }
                let label = format!("{}\n{:.1}", town.record.town, town.record.tourism_index);
                Self::paint_label(&painter, town_rect, &label, 11.0, Color32::WHITE);
            }
        }

        if let Some((district, town)) = hovered {
            let record = town.record.clone();
            let district_total = district.total;
            response.on_hover_ui_at_pointer(|ui| {
                ui.label(RichText::new(format!("{} / {}", record.district, record.town)).strong());
                egui::Grid::new("treemap_hover").num_columns(2).show(ui, |ui| {
                    let rows = [
                        (TOURISM_INDEX, format!("{:.2}", record.tourism_index)),
                        (RESTAURANTS, record.restaurants.to_string()),
                        (GUEST_HOUSES, record.guest_houses.to_string()),
                        (HOTELS, record.hotels.to_string()),
                        (CAFES, record.cafes.to_string()),
                        ("District total index", format!("{:.2}", district_total)),
                    ];
                    for (name, value) in rows {
                        ui.label(name);
                        ui.label(value);
                        ui.end_row();
                    }
                });
            });
        } else if let Some(pos) = response.hover_pos() {
            if let Some(district) = layout.district_at(pos.x as f64, pos.y as f64) {
                let text = format!(
                    "{}\n{}: {:.2}",
                    district.name, TOURISM_INDEX, district.total
                );
                response.on_hover_text_at_pointer(text);
            }
        }
    }

    /// Paint a label in the top-left corner of `rect` if it fits.
    fn paint_label(painter: &egui::Painter, rect: egui::Rect, text: &str, size: f32, color: Color32) {
        let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(size), color);
        let padded = galley.size() + egui::vec2(6.0, 4.0);
        if padded.x <= rect.width() && padded.y <= rect.height() {
            painter.galley(rect.min + egui::vec2(3.0, 2.0), galley, color);
        }
    }

    /// Draw the summary table for the treemap view
    pub fn draw_summary_table(ui: &mut egui::Ui, summary: &IndexSummary) {
        let fmt = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".into());

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("index_summary")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Towns", "Districts", "Mean", "Median", "Std"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        ui.label(RichText::new(summary.towns.to_string()).size(11.0));
                        ui.label(RichText::new(summary.districts.to_string()).size(11.0));
                        ui.label(RichText::new(fmt(summary.mean)).size(11.0));
                        ui.label(RichText::new(fmt(summary.median)).size(11.0));
                        ui.label(RichText::new(fmt(summary.std_dev)).size(11.0));
                        ui.end_row();
                    });
            });
    }
}

fn to_egui_rect(rect: TileRect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.w as f32, rect.h as f32),
    )
}
