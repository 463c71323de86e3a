//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::pipeline::{CleaningConfig, LoadOptions, DEFAULT_FENCE_MULTIPLIER, DEFAULT_HEADER_ROWS};

/// Gaiaclean - Clean, combine and describe Gaia catalog samples
#[derive(Parser, Debug)]
#[command(name = "gaiaclean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean a single raw catalog file
    Clean {
        /// Raw catalog file (semicolon, tab or comma separated)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (CSV or Parquet, determined by extension).
        /// Defaults to the input directory with a '_clean.csv' suffix.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON report of the stage counts to this path
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        cleaning: CleaningArgs,
    },

    /// Clean the three samples and combine them with a sample tag
    Combine {
        /// Raw file for the galactic-plane sample (tag 1)
        #[arg(long)]
        plane: PathBuf,

        /// Raw file for the mid-plane sample (tag 2)
        #[arg(long)]
        mid_plane: PathBuf,

        /// Raw file for the perpendicular sample (tag 3)
        #[arg(long)]
        perpendicular: PathBuf,

        /// Output file path (CSV or Parquet, determined by extension)
        #[arg(short, long)]
        output: PathBuf,

        /// Write a JSON report of the stage counts to this path
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        cleaning: CleaningArgs,
    },

    /// Build the error-term subset with a magnitude class label
    Classify {
        /// Cleaned or combined table (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (CSV or Parquet, determined by extension)
        #[arg(short, long)]
        output: PathBuf,

        /// Overwrite existing output without asking
        #[arg(long, default_value = "false")]
        no_confirm: bool,
    },

    /// Print five-number summaries, the radial-velocity distribution and
    /// magnitude/flux correlations
    Describe {
        /// Cleaned or combined table (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Histogram bins for the radial-velocity distribution (default: Sturges' rule)
        #[arg(long)]
        rv_bins: Option<usize>,
    },
}

/// Flags shared by the commands that run the cleaning pipeline
#[derive(Args, Debug, Clone)]
pub struct CleaningArgs {
    /// Field separator for raw files. Sniffed from the header line when omitted.
    #[arg(long, value_parser = parse_separator)]
    pub separator: Option<u8>,

    /// Rows between the header and the first observation (units and separator rows)
    #[arg(long, default_value_t = DEFAULT_HEADER_ROWS)]
    pub header_rows: usize,

    /// Column holding the duplicate flag (rows with value 1 are dropped)
    #[arg(long, default_value = "Dup")]
    pub dup_column: String,

    /// Columns screened for outliers after cleaning (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub outlier_columns: Vec<String>,

    /// Interquartile-range multiplier for the outlier fences
    #[arg(long, default_value_t = DEFAULT_FENCE_MULTIPLIER, value_parser = validate_fence_multiplier)]
    pub fence_multiplier: f64,

    /// Overwrite existing output without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

impl CleaningArgs {
    pub fn config(&self) -> CleaningConfig {
        CleaningConfig {
            header_rows: self.header_rows,
            duplicate_column: self.dup_column.clone(),
            fence_multiplier: self.fence_multiplier,
            outlier_columns: self.outlier_columns.clone(),
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            separator: self.separator,
        }
    }
}

/// Default output path for `clean`: beside the input with a '_clean.csv' suffix.
pub fn default_clean_output(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    parent.join(format!("{}_clean.csv", stem))
}

/// Parser for the separator flag: a single ASCII character, or `tab`
fn parse_separator(s: &str) -> Result<u8, String> {
    if s.eq_ignore_ascii_case("tab") || s == "\\t" {
        return Ok(b'\t');
    }

    let bytes = s.as_bytes();
    if bytes.len() == 1 && bytes[0].is_ascii() {
        Ok(bytes[0])
    } else {
        Err(format!("separator must be a single ASCII character, got '{}'", s))
    }
}

/// Validator for fence_multiplier parameter
fn validate_fence_multiplier(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("fence_multiplier must be positive, got {}", value))
    }
}
