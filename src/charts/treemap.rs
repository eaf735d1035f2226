//! Treemap Layout Module
//! Squarified treemap (Bruls, Huizing, van Wijk) for the District > Town
//! hierarchy. Geometry only; drawing lives in the plotter and renderer.

use crate::data::{FacilityRecord, IndexView};

/// Axis-aligned rectangle in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl TileRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Shrink by `pad` on every side, never below zero size.
    pub fn inset(&self, pad: f64) -> Self {
        let pad_x = pad.min(self.w / 2.0);
        let pad_y = pad.min(self.h / 2.0);
        Self::new(
            self.x + pad_x,
            self.y + pad_y,
            self.w - 2.0 * pad_x,
            self.h - 2.0 * pad_y,
        )
    }
}

/// A town cell inside its district.
#[derive(Debug, Clone, PartialEq)]
pub struct TownTile {
    pub record: FacilityRecord,
    pub rect: TileRect,
}

/// A district block holding its towns.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictTile {
    pub name: String,
    /// Sum of the Tourism Index of the towns drawn in this block.
    pub total: f64,
    pub rect: TileRect,
    pub towns: Vec<TownTile>,
}

/// Two-level treemap of Tourism Index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreemapLayout {
    pub districts: Vec<DistrictTile>,
    /// Rows left out because their index cannot be drawn as an area.
    pub skipped: usize,
}

impl TreemapLayout {
    /// Lay out `view` inside `bounds`. Each district reserves a `header`
    /// strip for its label when tall enough; towns are inset by `padding`.
    pub fn compute(view: &IndexView, bounds: TileRect, header: f64, padding: f64) -> Self {
        let mut groups: Vec<(String, Vec<&FacilityRecord>)> = Vec::new();
        let mut skipped = 0;

        for record in &view.records {
            if !(record.tourism_index.is_finite() && record.tourism_index > 0.0) {
                skipped += 1;
                continue;
            }
            match groups.iter_mut().find(|(name, _)| *name == record.district) {
                Some((_, towns)) => towns.push(record),
                None => groups.push((record.district.clone(), vec![record])),
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "Treemap skipped non-positive index values");
        }

        let totals: Vec<f64> = groups
            .iter()
            .map(|(_, towns)| towns.iter().map(|r| r.tourism_index).sum())
            .collect();
        let district_rects = squarify(&totals, bounds);

        let districts = groups
            .into_iter()
            .zip(totals)
            .zip(district_rects)
            .map(|(((name, towns), total), rect)| {
                let body = if rect.h > header * 2.0 {
                    TileRect::new(rect.x, rect.y + header, rect.w, rect.h - header)
                } else {
                    rect
                };
                let body = body.inset(padding);
                let values: Vec<f64> = towns.iter().map(|r| r.tourism_index).collect();
                let towns = towns
                    .into_iter()
                    .zip(squarify(&values, body))
                    .map(|(record, rect)| TownTile {
                        record: record.clone(),
                        rect: rect.inset(padding / 2.0),
                    })
                    .collect();

                DistrictTile {
                    name,
                    total,
                    rect,
                    towns,
                }
            })
            .collect();

        Self { districts, skipped }
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Town tile under the point, if any.
    pub fn town_at(&self, x: f64, y: f64) -> Option<(&DistrictTile, &TownTile)> {
        self.districts
            .iter()
            .filter(|d| d.rect.contains(x, y))
            .find_map(|d| d.towns.iter().find(|t| t.rect.contains(x, y)).map(|t| (d, t)))
    }

    /// District block under the point, if any.
    pub fn district_at(&self, x: f64, y: f64) -> Option<&DistrictTile> {
        self.districts.iter().find(|d| d.rect.contains(x, y))
    }
}

/// Squarified layout of positive `values` inside `bounds`.
///
/// Returns one rectangle per value, in input order. Areas are proportional to
/// the values and the rectangles tile `bounds` exactly.
pub fn squarify(values: &[f64], bounds: TileRect) -> Vec<TileRect> {
    let mut rects = vec![TileRect::new(bounds.x, bounds.y, 0.0, 0.0); values.len()];
    let total: f64 = values.iter().sum();
    if values.is_empty() || total <= 0.0 || bounds.area() <= 0.0 {
        return rects;
    }

    let scale = bounds.area() / total;
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut free = bounds;
    let mut row: Vec<(usize, f64)> = Vec::new();

    for idx in order {
        let area = values[idx] * scale;
        let side = free.w.min(free.h);
        let improves = row.is_empty() || {
            let mut grown = row.clone();
            grown.push((idx, area));
            worst_ratio(&grown, side) <= worst_ratio(&row, side)
        };
        if improves {
            row.push((idx, area));
        } else {
            free = place_row(&row, free, &mut rects);
            row.clear();
            row.push((idx, area));
        }
    }
    if !row.is_empty() {
        place_row(&row, free, &mut rects);
    }

    rects
}

/// Worst aspect ratio of a row laid along a side of length `side`.
fn worst_ratio(row: &[(usize, f64)], side: f64) -> f64 {
    let sum: f64 = row.iter().map(|(_, a)| a).sum();
    let (min, max) = row
        .iter()
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), &(_, a)| (lo.min(a), hi.max(a)));
    if sum <= 0.0 || min <= 0.0 {
        return f64::INFINITY;
    }
    let side2 = side * side;
    let sum2 = sum * sum;
    (side2 * max / sum2).max(sum2 / (side2 * min))
}

/// Place a row along the shorter side of `free` and return what is left.
fn place_row(row: &[(usize, f64)], free: TileRect, rects: &mut [TileRect]) -> TileRect {
    let sum: f64 = row.iter().map(|(_, a)| a).sum();

    if free.w >= free.h {
        let width = if free.h > 0.0 { sum / free.h } else { 0.0 };
        let mut y = free.y;
        for &(idx, area) in row {
            let height = if width > 0.0 { area / width } else { 0.0 };
            rects[idx] = TileRect::new(free.x, y, width, height);
            y += height;
        }
        TileRect::new(free.x + width, free.y, (free.w - width).max(0.0), free.h)
    } else {
        let height = if free.w > 0.0 { sum / free.w } else { 0.0 };
        let mut x = free.x;
        for &(idx, area) in row {
            let width = if height > 0.0 { area / height } else { 0.0 };
            rects[idx] = TileRect::new(x, free.y, width, height);
            x += width;
        }
        TileRect::new(free.x, free.y + height, free.w, (free.h - height).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn record(district: &str, town: &str, index: f64) -> FacilityRecord {
        FacilityRecord {
            district: district.into(),
            town: town.into(),
            hotels: 1,
            restaurants: 2,
            guest_houses: 3,
            cafes: 4,
            tourism_index: index,
        }
    }

    #[test]
    fn squarify_areas_are_proportional() {
        let values = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0];
        let bounds = TileRect::new(0.0, 0.0, 6.0, 4.0);
        let rects = squarify(&values, bounds);

        assert_eq!(rects.len(), values.len());
        for (rect, value) in rects.iter().zip(values) {
            assert!((rect.area() - value).abs() < EPS, "{rect:?} vs {value}");
        }
        let covered: f64 = rects.iter().map(TileRect::area).sum();
        assert!((covered - bounds.area()).abs() < EPS);
    }

    #[test]
    fn squarify_stays_inside_bounds() {
        let bounds = TileRect::new(10.0, 20.0, 300.0, 120.0);
        for rect in squarify(&[5.0, 1.0, 9.0, 2.5], bounds) {
            assert!(rect.x >= bounds.x - EPS && rect.y >= bounds.y - EPS);
            assert!(rect.x + rect.w <= bounds.x + bounds.w + EPS);
            assert!(rect.y + rect.h <= bounds.y + bounds.h + EPS);
        }
    }

    #[test]
    fn squarify_single_value_fills_bounds() {
        let bounds = TileRect::new(0.0, 0.0, 50.0, 30.0);
        let rects = squarify(&[7.0], bounds);
        assert_eq!(rects.len(), 1);
        assert!((rects[0].x - bounds.x).abs() < EPS && (rects[0].y - bounds.y).abs() < EPS);
        assert!((rects[0].w - bounds.w).abs() < EPS && (rects[0].h - bounds.h).abs() < EPS);
    }

    #[test]
    fn squarify_degenerate_inputs_give_empty_rects() {
        assert!(squarify(&[], TileRect::new(0.0, 0.0, 1.0, 1.0)).is_empty());
        let rects = squarify(&[1.0, 2.0], TileRect::new(0.0, 0.0, 0.0, 10.0));
        assert!(rects.iter().all(|r| r.area() == 0.0));
    }

    #[test]
    fn layout_groups_towns_under_districts() {
        let view = IndexView {
            threshold: 0,
            records: vec![
                record("A", "X", 5.0),
                record("B", "Z", 2.0),
                record("A", "Y", 9.0),
            ],
        };
        let layout = TreemapLayout::compute(&view, TileRect::new(0.0, 0.0, 160.0, 100.0), 0.0, 0.0);

        let names: Vec<&str> = layout.districts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(layout.districts[0].total, 14.0);
        assert_eq!(layout.districts[0].towns.len(), 2);
        assert!((layout.districts[0].rect.area() - 16000.0 * 14.0 / 16.0).abs() < EPS);

        for district in &layout.districts {
            for town in &district.towns {
                let cx = town.rect.x + town.rect.w / 2.0;
                let cy = town.rect.y + town.rect.h / 2.0;
                let (hit_district, hit_town) = layout.town_at(cx, cy).unwrap();
                assert_eq!(hit_district.name, district.name);
                assert_eq!(hit_town.record.town, town.record.town);
            }
        }
    }

    #[test]
    fn layout_skips_non_positive_index() {
        let view = IndexView {
            threshold: 0,
            records: vec![record("A", "X", 0.0), record("A", "Y", 3.0), record("B", "Z", -1.0)],
        };
        let layout = TreemapLayout::compute(&view, TileRect::new(0.0, 0.0, 10.0, 10.0), 1.0, 0.5);
        assert_eq!(layout.skipped, 2);
        assert_eq!(layout.districts.len(), 1);
        assert_eq!(layout.districts[0].towns[0].record.town, "Y");
    }

    #[test]
    fn empty_view_gives_empty_layout() {
        let layout =
            TreemapLayout::compute(&IndexView::default(), TileRect::new(0.0, 0.0, 10.0, 10.0), 1.0, 1.0);
        assert!(layout.is_empty());
        assert!(layout.town_at(5.0, 5.0).is_none());
    }
}
