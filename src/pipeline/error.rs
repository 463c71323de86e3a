//! Error types for the cleaning pipeline.
//!
//! Cell-level problems never surface here: unparseable cells become nulls
//! and are dropped by the complete-case filter. These variants cover the
//! structural failures a caller may want to match on.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by the cleaning, outlier and combination stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required column is not present in the table.
    #[error("column '{column}' not found. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// Outlier detection was asked to run on a column that still has nulls.
    ///
    /// Fences are only defined on complete cases, so the complete-case filter
    /// must run first.
    #[error("column '{column}' has {count} missing value(s); run the complete-case filter first")]
    MissingValues { column: String, count: usize },

    /// Tables passed to the combiner do not share the same columns.
    #[error("sample '{sample}' does not match the first table's columns (expected {expected:?}, found {found:?})")]
    SchemaMismatch {
        sample: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A table already carries the column the combiner would add.
    #[error("sample '{sample}' already has a '{column}' column")]
    ReservedColumn { sample: String, column: String },

    /// The combiner was called without any tables.
    #[error("no tables to combine")]
    NoTables,

    /// The fence multiplier must be a positive, finite number.
    #[error("fence multiplier must be positive and finite, got {0}")]
    InvalidMultiplier(f64),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl PipelineError {
    /// Build a `MissingColumn` error listing the table's columns.
    pub fn missing_column(column: &str, df: &polars::prelude::DataFrame) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
            available: df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
