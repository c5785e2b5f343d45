//! File-based tests for the historical data pipeline.

use std::fs;

use adapter_history::{
    compute_statistics, convert_with_fx, HistoryError, PriceSeries, TROY_OUNCE_GRAMS,
};
use approx::assert_relative_eq;
use chrono::NaiveDate;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_pipeline_from_files() {
    let dir = TempDir::new().unwrap();
    let prices = write(
        &dir,
        "silver_usd.csv",
        "date,close\n\
         2024-01-02,23.00\n\
         2024-01-03,23.50\n\
         2024-01-05,23.20\n\
         2024-01-08,24.10\n",
    );
    let fx = write(
        &dir,
        "usd_inr.csv",
        "date,close\n\
         2024-01-02,83.0\n\
         2024-01-03,83.2\n\
         2024-01-04,83.1\n\
         2024-01-08,83.4\n",
    );

    let prices = PriceSeries::from_path(&prices).unwrap();
    let fx = PriceSeries::from_path(&fx).unwrap();
    let merged = convert_with_fx(&prices, &fx, TROY_OUNCE_GRAMS).unwrap();

    // Union of dates: 02, 03, 04, 05, 08
    assert_eq!(merged.len(), 5);
    // 01-04 carries the 01-03 price forward
    assert_relative_eq!(
        merged.closes()[2],
        23.50 / TROY_OUNCE_GRAMS * 83.1,
        epsilon = 1e-12
    );

    let start = NaiveDate::from_ymd_opt(2024, 1, 3);
    let stats = compute_statistics(&merged.window(start, None)).unwrap();
    assert_eq!(stats.observations, 3);
    assert_relative_eq!(
        stats.latest_price,
        24.10 / TROY_OUNCE_GRAMS * 83.4,
        epsilon = 1e-12
    );
}

#[test]
fn test_invalid_price_in_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.csv", "date,close\n2024-01-02,23.0\n2024-01-03,-1.0\n");

    assert!(matches!(
        PriceSeries::from_path(&path),
        Err(HistoryError::InvalidPrice { .. })
    ));
}

#[test]
fn test_single_row_is_insufficient() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "one.csv", "date,close\n2024-01-02,23.0\n");
    let series = PriceSeries::from_path(&path).unwrap();

    assert!(matches!(
        compute_statistics(&series),
        Err(HistoryError::InsufficientData {
            required: 2,
            actual: 1
        })
    ));
}

#[test]
fn test_window_excluding_everything() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "p.csv", "date,close\n2024-01-02,23.0\n2024-01-03,24.0\n");
    let series = PriceSeries::from_path(&path).unwrap();

    let end = NaiveDate::from_ymd_opt(2023, 12, 31);
    assert!(matches!(
        compute_statistics(&series.window(None, end)),
        Err(HistoryError::InsufficientData { actual: 0, .. })
    ));
}
