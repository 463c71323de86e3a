//! Table loading and saving for raw catalog extracts and cleaned tables

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Separators tried when sniffing a raw file's header line, in tie-break order.
const CANDIDATE_SEPARATORS: [u8; 4] = [b';', b'\t', b',', b'|'];

/// Extensions accepted for raw delimited catalog files.
const RAW_EXTENSIONS: [&str; 4] = ["csv", "tsv", "txt", "dat"];

/// Options for reading a raw catalog file
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Field separator. `None` sniffs it from the header line.
    pub separator: Option<u8>,
}

impl LoadOptions {
    pub fn with_separator(separator: u8) -> Self {
        Self {
            separator: Some(separator),
        }
    }
}

/// Load a raw catalog file with every column read as text.
///
/// The header row supplies column names. The unit and separator rows that
/// follow it are kept as ordinary rows; [`strip_unit_rows`](super::strip_unit_rows)
/// removes them before numeric coercion.
pub fn load_raw_table(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let extension = file_extension(path);
    if !RAW_EXTENSIONS.contains(&extension.as_str()) {
        anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, tsv, txt, dat",
            extension
        );
    }

    let separator = match options.separator {
        Some(sep) => sep,
        None => sniff_separator(path)?,
    };

    let mut df = LazyCsvReader::new(path)
        .with_separator(separator)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
        .with_context(|| format!("Failed to load raw file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to read raw file: {}", path.display()))?;

    // Fixed-width exports pad header names
    let trimmed: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    df.set_column_names(trimmed)?;

    Ok(df)
}

/// Load an already-cleaned table (CSV or Parquet based on extension)
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let extension = file_extension(path);

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read table: {}", path.display()))
}

/// Save a table to file (CSV or Parquet based on extension)
pub fn save_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = file_extension(path);

    match extension.as_str() {
        "csv" => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}

/// Pick the separator that occurs most often in the header line.
pub fn sniff_separator(path: &Path) -> Result<u8> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut header = String::new();
    BufReader::new(file)
        .read_line(&mut header)
        .with_context(|| format!("Failed to read header line: {}", path.display()))?;

    Ok(separator_for_line(&header))
}

/// Separator with the highest count in `line`; `;` when none occur.
pub fn separator_for_line(line: &str) -> u8 {
    let mut best = CANDIDATE_SEPARATORS[0];
    let mut best_count = 0;
    for sep in CANDIDATE_SEPARATORS {
        let count = line.bytes().filter(|&b| b == sep).count();
        if count > best_count {
            best = sep;
            best_count = count;
        }
    }
    best
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
