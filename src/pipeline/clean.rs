//! Cleaning pipeline: raw table to analysis-ready table
//!
//! Stages run in a fixed order and each one materializes a new table:
//! unit-row stripping, duplicate removal, complete-case filtering and, when
//! configured, outlier removal. Row counts after each stage go to a
//! [`StageObserver`]; observers only watch and never change the result.

use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::complete::complete_cases;
use super::duplicates::remove_duplicates;
use super::error::PipelineResult;
use super::outliers::{remove_outliers, ColumnOutliers, DEFAULT_FENCE_MULTIPLIER};
use super::schema::GaiaColumn;
use super::strip::{strip_unit_rows, DEFAULT_HEADER_ROWS};
use crate::utils::print_stage_count;

/// Cleaning parameters shared by every sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Rows between the header and the first observation
    pub header_rows: usize,
    /// Column holding the duplicate flag
    pub duplicate_column: String,
    /// Interquartile-range multiplier for outlier fences
    pub fence_multiplier: f64,
    /// Columns screened for outliers after complete-case filtering
    pub outlier_columns: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            header_rows: DEFAULT_HEADER_ROWS,
            duplicate_column: GaiaColumn::Dup.name().to_string(),
            fence_multiplier: DEFAULT_FENCE_MULTIPLIER,
            outlier_columns: Vec::new(),
        }
    }
}

/// Pipeline stage whose output row count is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Raw,
    Deduplicated,
    Complete,
    OutlierFiltered,
}

impl Stage {
    pub fn description(self) -> &'static str {
        match self {
            Stage::Raw => "raw rows",
            Stage::Deduplicated => "without duplicates",
            Stage::Complete => "complete cases",
            Stage::OutlierFiltered => "after outlier removal",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Receives the row count after each stage
pub trait StageObserver {
    fn stage_complete(&mut self, stage: Stage, rows: usize);
}

/// Prints each stage count to the terminal
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl StageObserver for ConsoleObserver {
    fn stage_complete(&mut self, stage: Stage, rows: usize) {
        print_stage_count(rows, stage.description());
    }
}

/// Records stage counts in order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StageLog {
    pub stages: Vec<(Stage, usize)>,
}

impl StageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count recorded for `stage`, if that stage ran.
    pub fn rows_at(&self, stage: Stage) -> Option<usize> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, rows)| *rows)
    }
}

impl StageObserver for StageLog {
    fn stage_complete(&mut self, stage: Stage, rows: usize) {
        self.stages.push((stage, rows));
    }
}

/// Forwards every stage to two observers
pub struct Tee<'a, A: ?Sized, B: ?Sized> {
    pub first: &'a mut A,
    pub second: &'a mut B,
}

impl<A, B> StageObserver for Tee<'_, A, B>
where
    A: StageObserver + ?Sized,
    B: StageObserver + ?Sized,
{
    fn stage_complete(&mut self, stage: Stage, rows: usize) {
        self.first.stage_complete(stage, rows);
        self.second.stage_complete(stage, rows);
    }
}

/// Output of [`clean_and_filter`]
#[derive(Debug, Clone)]
pub struct CleanedSample {
    pub table: DataFrame,
    /// Per-column outlier counts; empty when no outlier columns are configured
    pub outliers: Vec<ColumnOutliers>,
    pub outliers_removed: usize,
}

/// Turn a raw table into a numeric, duplicate-free, complete-case table.
///
/// Reports [`Stage::Raw`], [`Stage::Deduplicated`] and [`Stage::Complete`].
/// Calling this twice on the same input yields identical tables.
pub fn clean_table(
    raw: &DataFrame,
    config: &CleaningConfig,
    observer: &mut dyn StageObserver,
) -> PipelineResult<DataFrame> {
    let stripped = strip_unit_rows(raw, config.header_rows)?;
    observer.stage_complete(Stage::Raw, stripped.height());

    let deduplicated = remove_duplicates(&stripped, &config.duplicate_column)?;
    observer.stage_complete(Stage::Deduplicated, deduplicated.height());

    let complete = complete_cases(&deduplicated)?;
    observer.stage_complete(Stage::Complete, complete.height());

    Ok(complete)
}

/// [`clean_table`] followed by outlier removal over `config.outlier_columns`.
///
/// Reports [`Stage::OutlierFiltered`] only when outlier columns are configured.
pub fn clean_and_filter(
    raw: &DataFrame,
    config: &CleaningConfig,
    observer: &mut dyn StageObserver,
) -> PipelineResult<CleanedSample> {
    let complete = clean_table(raw, config, observer)?;

    if config.outlier_columns.is_empty() {
        return Ok(CleanedSample {
            table: complete,
            outliers: Vec::new(),
            outliers_removed: 0,
        });
    }

    let removal = remove_outliers(&complete, &config.outlier_columns, config.fence_multiplier)?;
    observer.stage_complete(Stage::OutlierFiltered, removal.table.height());

    Ok(CleanedSample {
        table: removal.table,
        outliers: removal.columns,
        outliers_removed: removal.removed,
    })
}
