//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Column layout used by the raw fixtures
pub const RAW_COLUMNS: [&str; 8] = ["RA_ICRS", "DE_ICRS", "Gmag", "e_Gmag", "FG", "e_FG", "RV", "Dup"];

/// Units row as it appears under the header of a catalog extract
pub const UNITS_ROW: [&str; 8] = ["deg", "deg", "mag", "mag", "e-/s", "e-/s", "km/s", ""];

/// Dashed separator row under the units row
pub const SEPARATOR_ROW: [&str; 8] = [
    "---------", "---------", "------", "------", "--------", "--------", "------", "-",
];

/// One synthetic observation, rendered as raw text cells.
///
/// Magnitude follows flux exactly (`G = -2.5 log10 F + 25.7`) so the
/// relationship tests have a known answer.
pub fn observation_cells(i: usize, dup: bool) -> [String; 8] {
    let flux = 1000.0 + 37.0 * i as f64;
    let gmag = -2.5 * flux.log10() + 25.7;
    [
        format!("{:.6}", 280.0 + (i % 50) as f64 * 0.01),
        format!("{:.6}", -5.0 + (i % 30) as f64 * 0.02),
        format!("{:.6}", gmag),
        format!("{:.6}", 0.001 + (i % 7) as f64 * 0.0001),
        format!("{:.3}", flux),
        format!("{:.3}", 2.0 + (i % 11) as f64 * 0.1),
        format!("{:.2}", -20.0 + (i % 40) as f64),
        if dup { "1".to_string() } else { "0".to_string() },
    ]
}

/// Build a raw text table: units row, separator row, then `rows` observations.
///
/// The first `duplicates` observations are flagged `Dup = 1`. The next
/// `incomplete` observations each have one unusable cell (blank or text).
pub fn create_raw_table(rows: usize, duplicates: usize, incomplete: usize) -> DataFrame {
    let mut cells: Vec<Vec<String>> = vec![Vec::with_capacity(rows + 2); RAW_COLUMNS.len()];

    for (c, col) in cells.iter_mut().enumerate() {
        col.push(UNITS_ROW[c].to_string());
        col.push(SEPARATOR_ROW[c].to_string());
    }

    for i in 0..rows {
        let mut row = observation_cells(i, i < duplicates);
        if i >= duplicates && i < duplicates + incomplete {
            // Alternate blank RV and unparseable FG
            if i % 2 == 0 {
                row[6] = String::new();
            } else {
                row[4] = "n/a".to_string();
            }
        }
        for (c, cell) in row.into_iter().enumerate() {
            cells[c].push(cell);
        }
    }

    let columns: Vec<Column> = RAW_COLUMNS
        .iter()
        .zip(cells)
        .map(|(name, values)| Column::new((*name).into(), values))
        .collect();

    DataFrame::new(columns).unwrap()
}

/// Render a raw catalog file (header, units, separator, data) as text.
pub fn raw_file_contents(rows: usize, duplicates: usize, incomplete: usize, sep: char) -> String {
    let df = create_raw_table(rows, duplicates, incomplete);
    let mut out = RAW_COLUMNS.join(&sep.to_string());
    out.push('\n');

    for row in 0..df.height() {
        let cells: Vec<String> = df
            .get_columns()
            .iter()
            .map(|c| c.str().unwrap().get(row).unwrap_or("").to_string())
            .collect();
        out.push_str(&cells.join(&sep.to_string()));
        out.push('\n');
    }
    out
}

/// Write `contents` to a file named `name` inside a fresh temporary directory.
pub fn write_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

/// A small cleaned numeric table with the fixture's columns (without `Dup`'s units)
pub fn create_clean_table(rows: usize, offset: usize) -> DataFrame {
    let raw = create_raw_table(rows + offset, 0, 0);
    let numeric = gaiaclean::pipeline::strip_unit_rows(&raw, 2).unwrap();
    numeric.slice(offset as i64, rows)
}

/// Values of a Float64 column, nulls included
pub fn f64_values(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    df.column(column).unwrap().f64().unwrap().into_iter().collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
