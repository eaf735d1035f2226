//! Static Chart Renderer
//! Writes PNG snapshots of the two dashboard charts using plotters.
//!
//! Layout mirrors the interactive view:
//! 1. Stacked bar chart: title "Tourism Facilities in {district}", one bar per
//!    town, legend in the upper right.
//! 2. Treemap: title, one block per district sized by its total Tourism Index,
//!    town cells inside labelled with name and index.

use crate::charts::plotter::{PALETTE, SERIES_COLORS};
use crate::charts::treemap::{TileRect, TreemapLayout};
use crate::data::schema::{GUEST_HOUSES, HOTELS, RESTAURANTS};
use crate::data::{DistrictBreakdown, IndexView};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const TREEMAP_TITLE: &str = "Treemap of Tourism Index by District and Town";

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render both charts into `dir`, returning the written file paths.
    pub fn export_dashboard(
        breakdown: &DistrictBreakdown,
        view: &IndexView,
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(dir)?;

        let bar_path = dir.join(format!(
            "tourism_facilities_{}.png",
            safe_file_stem(&breakdown.district)
        ));
        Self::render_stacked_bar_png(breakdown, &bar_path, width, height)?;

        let treemap_path = dir.join(format!("tourism_index_min_{}.png", view.threshold));
        Self::render_treemap_png(view, &treemap_path, width, height)?;

        tracing::info!(dir = %dir.display(), "Exported chart images");
        Ok(vec![bar_path, treemap_path])
    }

    /// Stacked bar chart of hotels, restaurants and guest houses per town.
    pub fn render_stacked_bar_png(
        breakdown: &DistrictBreakdown,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let n = breakdown.towns.len().max(1);
        let y_max = breakdown.max_total().max(1) as f64 * 1.1;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Tourism Facilities in {}", breakdown.district),
                ("sans-serif", 28),
            )
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)
            .map_err(draw_err)?;

        let towns: Vec<&str> = breakdown.towns.iter().map(|t| t.town.as_str()).collect();
        let town_label = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            towns.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&town_label)
            .x_desc("Town")
            .y_desc("Number of Facilities")
            .draw()
            .map_err(draw_err)?;

        for (series_idx, (label, color)) in [HOTELS, RESTAURANTS, GUEST_HOUSES]
            .into_iter()
            .zip(SERIES_COLORS)
            .enumerate()
        {
            let color = RGBColor(color.r(), color.g(), color.b());
            chart
                .draw_series(breakdown.towns.iter().enumerate().map(|(i, town)| {
                    let series = town.series();
                    let base: i64 = series[..series_idx].iter().map(|(_, v)| v).sum();
                    let top = base + series[series_idx].1;
                    let x = i as f64;
                    Rectangle::new([(x - 0.3, base as f64), (x + 0.3, top as f64)], color.filled())
                }))
                .map_err(draw_err)?
                .label(label)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }

    /// Treemap of Tourism Index, districts as blocks and towns as cells.
    pub fn render_treemap_png(
        view: &IndexView,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let body = root
            .titled(TREEMAP_TITLE, ("sans-serif", 28))
            .map_err(draw_err)?
            .margin(10, 10, 10, 10);

        let (w, h) = body.dim_in_pixel();
        let layout = TreemapLayout::compute(
            view,
            TileRect::new(0.0, 0.0, w as f64, h as f64),
            22.0,
            2.0,
        );

        if layout.is_empty() {
            body.draw(&Text::new(
                "No towns to display",
                (w as i32 / 2 - 80, h as i32 / 2),
                ("sans-serif", 20).into_font().color(&BLACK),
            ))
            .map_err(draw_err)?;
        }

        for (i, district) in layout.districts.iter().enumerate() {
            let c = PALETTE[i % PALETTE.len()];
            let color = RGBColor(c.r(), c.g(), c.b());

            body.draw(&Rectangle::new(pixel_corners(district.rect), color.mix(0.35).filled()))
                .map_err(draw_err)?;
            body.draw(&Rectangle::new(pixel_corners(district.rect), WHITE.stroke_width(2)))
                .map_err(draw_err)?;
            draw_fitting_label(&body, district.rect, &district.name, 16, &BLACK)?;

            for town in &district.towns {
                body.draw(&Rectangle::new(pixel_corners(town.rect), color.mix(0.85).filled()))
                    .map_err(draw_err)?;
                let label = format!("{} ({:.1})", town.record.town, town.record.tourism_index);
                draw_fitting_label(&body, town.rect, &label, 13, &WHITE)?;
            }
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Drawing(e.to_string())
}

fn pixel_corners(rect: TileRect) -> [(i32, i32); 2] {
    [
        (rect.x.round() as i32, rect.y.round() as i32),
        ((rect.x + rect.w).round() as i32, (rect.y + rect.h).round() as i32),
    ]
}

fn draw_fitting_label<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    rect: TileRect,
    text: &str,
    size: u32,
    color: &RGBColor,
) -> Result<(), RenderError> {
    let style = ("sans-serif", size).into_font().color(color);
    let (tw, th) = area.estimate_text_size(text, &style).map_err(draw_err)?;
    if (tw + 6) as f64 <= rect.w && (th + 4) as f64 <= rect.h {
        let pos = (rect.x.round() as i32 + 3, rect.y.round() as i32 + 3);
        area.draw(&Text::new(text.to_string(), pos, style))
            .map_err(draw_err)?;
    }
    Ok(())
}

/// File-name-safe version of a district name.
pub fn safe_file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "unnamed".to_string()
    } else {
        stem
    }
}
