//! JSON report documenting a cleaning run
//!
//! Records the configuration, the row count after every stage for every
//! sample, and the per-column outlier fences, so a cleaned table can be
//! traced back to its raw file.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CleaningConfig, ColumnOutliers, Stage, StageLog};

/// Metadata about the cleaning run
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the run (RFC 3339, UTC)
    pub timestamp: String,
    pub gaiaclean_version: String,
    pub config: CleaningConfig,
}

/// Row count after one stage
#[derive(Debug, Clone, Serialize)]
pub struct StageCount {
    pub stage: Stage,
    pub rows: usize,
}

/// Everything recorded for one input file
#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    pub sample: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<i32>,
    pub input_file: String,
    pub stages: Vec<StageCount>,
    pub outliers_removed: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outlier_columns: Vec<ColumnOutliers>,
}

impl SampleReport {
    pub fn new(sample: impl Into<String>, tag: Option<i32>, input_file: &Path, log: &StageLog) -> Self {
        Self {
            sample: sample.into(),
            tag,
            input_file: input_file.display().to_string(),
            stages: log
                .stages
                .iter()
                .map(|&(stage, rows)| StageCount { stage, rows })
                .collect(),
            outliers_removed: 0,
            outlier_columns: Vec::new(),
        }
    }

    pub fn with_outliers(mut self, columns: Vec<ColumnOutliers>, removed: usize) -> Self {
        self.outlier_columns = columns;
        self.outliers_removed = removed;
        self
    }
}

/// Complete cleaning report
#[derive(Debug, Clone, Serialize)]
pub struct CleaningReport {
    pub metadata: ReportMetadata,
    pub samples: Vec<SampleReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
}

impl CleaningReport {
    pub fn new(config: &CleaningConfig) -> Self {
        Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                gaiaclean_version: env!("CARGO_PKG_VERSION").to_string(),
                config: config.clone(),
            },
            samples: Vec::new(),
            combined_rows: None,
            output_file: None,
        }
    }

    pub fn add_sample(&mut self, sample: SampleReport) {
        self.samples.push(sample);
    }

    pub fn set_output(&mut self, path: &Path, rows: usize, combined: bool) {
        self.output_file = Some(path.display().to_string());
        if combined {
            self.combined_rows = Some(rows);
        }
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize cleaning report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }
}
