//! Artifact writers.
//!
//! - path matrix CSV: header `step,0,1,…,N-1`, one row per step
//! - confidence bands CSV: header `step,p5,p20,…`
//! - rolling volatility CSV: header `date,annualized_volatility`
//! - pretty JSON for any serialisable record

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use adapter_history::VolatilityPoint;
use forecast_risk::ConfidenceBands;
use forecast_sim::PricePathMatrix;
use serde::Serialize;

use crate::Result;

/// Writes the path matrix as CSV, rows = steps, columns = paths.
///
/// # Errors
///
/// Returns the CSV writer's error on I/O failure.
pub fn write_matrix_csv<W: Write>(writer: W, matrix: &PricePathMatrix) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(matrix.n_paths() + 1);
    header.push("step".to_string());
    header.extend((0..matrix.n_paths()).map(|p| p.to_string()));
    csv.write_record(&header)?;

    let mut record = Vec::with_capacity(matrix.n_paths() + 1);
    for (step, row) in matrix.rows().enumerate() {
        record.clear();
        record.push(step.to_string());
        record.extend(row.iter().map(f64::to_string));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Column label for a band level: `0.05` → `p5`, `0.025` → `p2.5`.
pub fn band_label(level: f64) -> String {
    let pct = level * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("p{}", pct.round() as i64)
    } else {
        format!("p{}", pct)
    }
}

/// Writes confidence bands as CSV, one row per step.
///
/// # Errors
///
/// Returns the CSV writer's error on I/O failure.
pub fn write_bands_csv<W: Write>(writer: W, bands: &ConfidenceBands) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["step".to_string()];
    header.extend(bands.levels().iter().map(|&l| band_label(l)));
    csv.write_record(&header)?;

    for (step, row) in bands.rows().enumerate() {
        let mut record = vec![step.to_string()];
        record.extend(row.iter().map(f64::to_string));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes the rolling volatility series as CSV, one row per date.
///
/// # Errors
///
/// Returns the CSV writer's error on I/O failure.
pub fn write_volatility_csv<W: Write>(writer: W, points: &[VolatilityPoint]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for point in points {
        csv.serialize(point)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes `value` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an I/O or serialisation error.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Creates `path` and writes the matrix CSV into it.
///
/// # Errors
///
/// Returns an I/O or CSV error.
pub fn write_matrix_file(path: &Path, matrix: &PricePathMatrix) -> Result<()> {
    write_matrix_csv(BufWriter::new(File::create(path)?), matrix)
}

/// Creates `path` and writes the bands CSV into it.
///
/// # Errors
///
/// Returns an I/O or CSV error.
pub fn write_bands_file(path: &Path, bands: &ConfidenceBands) -> Result<()> {
    write_bands_csv(BufWriter::new(File::create(path)?), bands)
}

/// Creates `path` and writes the rolling volatility CSV into it.
///
/// # Errors
///
/// Returns an I/O or CSV error.
pub fn write_volatility_file(path: &Path, points: &[VolatilityPoint]) -> Result<()> {
    write_volatility_csv(BufWriter::new(File::create(path)?), points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn matrix() -> PricePathMatrix {
        PricePathMatrix::from_rows(vec![vec![100.0, 100.0], vec![101.5, 99.25]]).unwrap()
    }

    #[test]
    fn test_matrix_csv_layout() {
        let mut buf = Vec::new();
        write_matrix_csv(&mut buf, &matrix()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "step,0,1\n0,100,100\n1,101.5,99.25\n");
    }

    #[test]
    fn test_bands_csv_layout() {
        let bands = ConfidenceBands::from_paths(&matrix(), &[0.0, 1.0]).unwrap();
        let mut buf = Vec::new();
        write_bands_csv(&mut buf, &bands).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "step,p0,p100\n0,100,100\n1,99.25,101.5\n");
    }

    #[test]
    fn test_volatility_csv_layout() {
        let points = [
            VolatilityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                annualized_volatility: 0.25,
            },
            VolatilityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                annualized_volatility: 0.5,
            },
        ];
        let mut buf = Vec::new();
        write_volatility_csv(&mut buf, &points).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "date,annualized_volatility\n2024-01-02,0.25\n2024-01-03,0.5\n"
        );
    }

    #[test]
    fn test_band_label() {
        assert_eq!(band_label(0.05), "p5");
        assert_eq!(band_label(0.2), "p20");
        assert_eq!(band_label(0.5), "p50");
        assert_eq!(band_label(0.95), "p95");
        assert_eq!(band_label(0.025), "p2.5");
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");
        write_json(&path, &vec![1.0, 2.5]).unwrap();

        let parsed: Vec<f64> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, vec![1.0, 2.5]);
    }
}
