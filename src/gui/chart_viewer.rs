//! Chart Viewer Widget
//! Central scrollable panel with the two charts and their narrative text.

use crate::charts::ChartPlotter;
use crate::data::{DistrictBreakdown, IndexView};
use crate::stats::IndexSummary;
use egui::{RichText, ScrollArea};

const CHART_HEIGHT: f32 = 420.0;
const SECTION_SPACING: f32 = 20.0;

const INTRO: &str = "Welcome to this interactive dashboard, which explores tourism \
infrastructure across various districts and towns. Use the interactive features to dive \
deeper into the tourism landscape, understand the distribution of facilities, and identify \
areas with the most potential.";

const BAR_HEADER: &str = "Stacked Bar Chart: Distribution of Tourism Facilities by District";
const BAR_DESCRIPTION: &str = "The stacked bar chart below displays the number of tourism \
facilities (hotels, restaurants, guest houses) in each town. Select a district to focus on \
the towns within it and see how tourism infrastructure is spread across different areas.";
const BAR_INSIGHTS: &str = "The stacked bars show the composition of facilities in each town \
of the selected district. Towns with a more diverse set of tourism services stand out \
quickly, as do towns lacking a specific category.";

const TREEMAP_HEADER: &str = "Treemap: Tourism Index by District and Town";
const TREEMAP_DESCRIPTION: &str = "The treemap provides a hierarchical view of the Tourism \
Index, which indicates the overall tourism potential of different areas. Use the slider to \
filter towns by a minimum Tourism Index. Hover over a town to see its restaurants, guest \
houses, hotels and cafes.";
const TREEMAP_INSIGHTS: &str = "Larger cells mark towns and districts with a higher Tourism \
Index. Raising the minimum index filters out areas with lower potential, leaving the more \
developed ones alongside the distribution of their key facilities.";

const CONCLUSION: &str = "The stacked bar chart focuses on the distribution of facilities in \
individual towns, while the treemap highlights tourism potential across the country. \
Together they point to where tourism development and infrastructure efforts would have the \
most effect.";

/// Views currently on screen.
#[derive(Default)]
pub struct ChartViewer {
    pub breakdown: DistrictBreakdown,
    pub index_view: IndexView,
    pub summary: IndexSummary,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both views after a widget change.
    pub fn set_views(&mut self, breakdown: DistrictBreakdown, index_view: IndexView) {
        self.summary = IndexSummary::from_view(&index_view);
        self.breakdown = breakdown;
        self.index_view = index_view;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, title: &str) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new(title).size(24.0).strong());
                ui.add_space(6.0);
                ui.label(INTRO);
                ui.add_space(SECTION_SPACING);

                // ===== Stacked bar chart =====
                ui.heading(BAR_HEADER);
                ui.label(BAR_DESCRIPTION);
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("Tourism Facilities in {}", self.breakdown.district))
                        .size(16.0)
                        .strong(),
                );
                ChartPlotter::draw_stacked_bar_chart(ui, &self.breakdown, CHART_HEIGHT);
                ui.add_space(6.0);
                ui.label(RichText::new("Insights").strong());
                ui.label(BAR_INSIGHTS);
                ui.add_space(SECTION_SPACING);
                ui.separator();

                // ===== Treemap =====
                ui.heading(TREEMAP_HEADER);
                ui.label(TREEMAP_DESCRIPTION);
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Treemap of Tourism Index by District and Town")
                        .size(16.0)
                        .strong(),
                );
                ChartPlotter::draw_treemap(ui, &self.index_view, CHART_HEIGHT);
                ui.add_space(8.0);
                ChartPlotter::draw_summary_table(ui, &self.summary);
                ui.add_space(6.0);
                ui.label(RichText::new("Insights").strong());
                ui.label(TREEMAP_INSIGHTS);
                ui.add_space(SECTION_SPACING);
                ui.separator();

                ui.label(RichText::new("Conclusion").strong());
                ui.label(CONCLUSION);
            });
    }
}
