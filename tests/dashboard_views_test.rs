use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use tourism_explorer::charts::{TileRect, TreemapLayout};
use tourism_explorer::data::{DataLoader, DataProcessor, LoaderError, TownFacilities};
use tourism_explorer::stats::IndexSummary;

const HEADER: &str = "District,Town,Total number of hotels,Total number of restaurants,Total number of guest houses,Total number of cafes,Tourism Index";

fn write_csv(dir: &TempDir, name: &str, body: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, body)?;
    Ok(path)
}

fn sample_csv() -> String {
    format!("{HEADER}\nA,X,2,1,0,3,5\nA,Y,0,3,1,1,9\nB,Z,1,1,1,0,2\n")
}

#[test]
fn three_row_sample_produces_expected_views() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_csv(&dir, "Tourism.csv", &sample_csv())?;
    let table = DataLoader::new().load_csv(&path)?;

    assert_eq!(table.row_count(), 3);
    assert_eq!(table.source_path(), Some(path.as_path()));
    assert_eq!(table.districts(), vec!["A", "B"]);

    let breakdown = DataProcessor::district_breakdown(&table, "A")?;
    assert_eq!(
        breakdown.towns,
        vec![
            TownFacilities {
                town: "X".into(),
                hotels: 2,
                restaurants: 1,
                guest_houses: 0,
            },
            TownFacilities {
                town: "Y".into(),
                hotels: 0,
                restaurants: 3,
                guest_houses: 1,
            },
        ]
    );

    let towns_at = |threshold: i64| -> Result<Vec<String>> {
        Ok(DataProcessor::index_view(&table, threshold)?
            .records
            .into_iter()
            .map(|r| r.town)
            .collect())
    };
    assert_eq!(towns_at(5)?, vec!["X", "Y"]);
    assert_eq!(towns_at(9)?, vec!["Y"]);

    Ok(())
}

#[test]
fn threshold_bounds_cover_full_and_empty_views() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_csv(&dir, "Tourism.csv", &sample_csv())?;
    let table = DataLoader::new().load_csv(&path)?;
    let bounds = table.index_bounds().expect("non-empty table has bounds");

    assert_eq!((bounds.min, bounds.max), (2, 9));
    assert_eq!(DataProcessor::index_view(&table, bounds.min)?.len(), table.row_count());
    assert!(DataProcessor::index_view(&table, bounds.max + 1)?.is_empty());

    let mut previous = usize::MAX;
    for t in bounds.min..=bounds.max {
        let view = DataProcessor::index_view(&table, t)?;
        assert!(view.records.iter().all(|r| r.tourism_index >= t as f64));
        assert!(view.len() <= previous);
        previous = view.len();
    }
    Ok(())
}

#[test]
fn breakdown_only_contains_selected_district() -> Result<()> {
    let table = DataLoader::new().load_from_reader(sample_csv().as_bytes())?;
    for district in table.districts() {
        let breakdown = DataProcessor::district_breakdown(&table, &district)?;
        let expected: Vec<String> = table
            .records()?
            .into_iter()
            .filter(|r| r.district == district)
            .map(|r| r.town)
            .collect();
        let towns: Vec<String> = breakdown.towns.into_iter().map(|t| t.town).collect();
        assert_eq!(towns, expected);
    }
    assert!(DataProcessor::district_breakdown(&table, "Nowhere")?.is_empty());
    Ok(())
}

#[test]
fn missing_column_fails_load_with_column_name() -> Result<()> {
    let dir = TempDir::new()?;
    let body = "District,Town,Total number of hotels,Total number of restaurants,Total number of cafes,Tourism Index\nA,X,2,1,0,5\n";
    let path = write_csv(&dir, "broken.csv", body)?;

    let err = DataLoader::new().load_csv(&path).unwrap_err();
    assert!(matches!(err, LoaderError::MissingColumns(ref cols) if cols == &["Total number of guest houses"]));
    assert!(err.to_string().contains("Total number of guest houses"));
    Ok(())
}

#[test]
fn missing_file_fails_load() {
    let dir = TempDir::new().unwrap();
    let err = DataLoader::new()
        .load_csv(&dir.path().join("absent.csv"))
        .unwrap_err();
    assert!(matches!(err, LoaderError::NotFound(_)));
}

#[test]
fn treemap_and_summary_follow_the_filtered_view() -> Result<()> {
    let table = DataLoader::new().load_from_reader(sample_csv().as_bytes())?;
    let view = DataProcessor::index_view(&table, 5)?;

    let layout = TreemapLayout::compute(&view, TileRect::new(0.0, 0.0, 400.0, 300.0), 18.0, 2.0);
    assert_eq!(layout.districts.len(), 1);
    assert_eq!(layout.districts[0].name, "A");
    assert_eq!(layout.districts[0].total, 14.0);

    let summary = IndexSummary::from_view(&view);
    assert_eq!(summary.towns, 2);
    assert_eq!(summary.districts, 1);
    assert_eq!(summary.mean, Some(7.0));
    Ok(())
}

#[test]
fn row_without_index_is_left_out_of_treemap() -> Result<()> {
    let body = format!("{HEADER}\nA,X,2,1,0,,5\nA,Y,0,3,1,1,\nB,Z,1,1,1,0,2\n");
    let table = DataLoader::new().load_from_reader(body.as_bytes())?;
    assert_eq!(table.row_count(), 3);

    let view = DataProcessor::index_view(&table, 0)?;
    let towns: Vec<&str> = view.records.iter().map(|r| r.town.as_str()).collect();
    assert_eq!(towns, vec!["X", "Z"]);

    let layout = TreemapLayout::compute(&view, TileRect::new(0.0, 0.0, 400.0, 300.0), 18.0, 2.0);
    let tiled: usize = layout.districts.iter().map(|d| d.towns.len()).sum();
    assert_eq!(tiled, 2);
    assert_eq!(layout.skipped, 0);
    Ok(())
}
