//! Outlier detection with Tukey fences
//!
//! Fences are derived from a column's five-number summary. The default
//! multiplier of 2.0 places them further out than the usual 1.5 inner fence,
//! so only extreme points are flagged and the long right tails typical of
//! astrophysical measurements survive.

use std::collections::BTreeSet;

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::complete::filter_rows;
use super::error::{PipelineError, PipelineResult};

/// Interquartile-range multiplier for the outer fence.
pub const DEFAULT_FENCE_MULTIPLIER: f64 = 2.0;

/// Minimum, lower hinge, median, upper hinge and maximum of a column.
///
/// Hinges follow Tukey's definition: the medians of the lower and upper
/// halves of the sorted data, with the median included in both halves when
/// the count is odd.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub lower_hinge: f64,
    pub median: f64,
    pub upper_hinge: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Summarize `values`. Returns `None` for empty input or when any value is NaN.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() || values.iter().any(|v| v.is_nan()) {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self::from_sorted(&sorted))
    }

    /// Summarize data that is already sorted ascending and non-empty.
    pub fn from_sorted(sorted: &[f64]) -> Self {
        let n = sorted.len() as f64;
        let n4 = ((n + 3.0) / 2.0).floor() / 2.0;

        // 1-based depths; a half depth averages its two neighbours
        let at_depth = |depth: f64| {
            let lo = depth.floor() as usize - 1;
            let hi = depth.ceil() as usize - 1;
            0.5 * (sorted[lo] + sorted[hi])
        };

        Self {
            min: sorted[0],
            lower_hinge: at_depth(n4),
            median: at_depth((n + 1.0) / 2.0),
            upper_hinge: at_depth(n + 1.0 - n4),
            max: sorted[sorted.len() - 1],
        }
    }

    /// Upper hinge minus lower hinge.
    pub fn spread(&self) -> f64 {
        self.upper_hinge - self.lower_hinge
    }
}

/// Closed interval outside of which a value is an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TukeyFence {
    pub lower: f64,
    pub upper: f64,
}

impl TukeyFence {
    pub fn from_summary(summary: &FiveNumberSummary, multiplier: f64) -> Self {
        let step = multiplier * summary.spread();
        Self {
            lower: summary.lower_hinge - step,
            upper: summary.upper_hinge + step,
        }
    }

    /// True when `value` lies inside `[lower, upper]`. Values on a fence are kept.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Outliers found in one column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnOutliers {
    pub column: String,
    pub fence: Option<TukeyFence>,
    pub flagged: usize,
}

/// Result of removing outliers across several columns.
#[derive(Debug, Clone)]
pub struct OutlierRemoval {
    pub table: DataFrame,
    pub columns: Vec<ColumnOutliers>,
    /// Distinct rows removed; a row flagged by several columns counts once.
    pub removed: usize,
}

/// Indices of `values` lying strictly outside the fence.
pub fn outlier_indices(values: &[f64], multiplier: f64) -> Vec<usize> {
    match FiveNumberSummary::from_values(values) {
        Some(summary) => {
            let fence = TukeyFence::from_summary(&summary, multiplier);
            indices_outside(values, &fence)
        }
        None => Vec::new(),
    }
}

fn indices_outside(values: &[f64], fence: &TukeyFence) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| !fence.contains(v))
        .map(|(i, _)| i)
        .collect()
}

/// Row indices of outliers in one column of a complete-case table.
pub fn column_outliers(
    df: &DataFrame,
    column: &str,
    multiplier: f64,
) -> PipelineResult<Vec<usize>> {
    let (_, indices) = fence_and_indices(df, column, multiplier)?;
    Ok(indices)
}

fn fence_and_indices(
    df: &DataFrame,
    column: &str,
    multiplier: f64,
) -> PipelineResult<(Option<TukeyFence>, Vec<usize>)> {
    validate_multiplier(multiplier)?;

    let col = df
        .column(column)
        .map_err(|_| PipelineError::missing_column(column, df))?;

    // Cells that fail the cast become nulls, so count after casting
    let cast = col.cast(&DataType::Float64)?;
    let floats = cast.f64()?;
    let missing = floats
        .into_iter()
        .filter(|v| v.map_or(true, f64::is_nan))
        .count();
    if missing > 0 {
        return Err(PipelineError::MissingValues {
            column: column.to_string(),
            count: missing,
        });
    }

    let values: Vec<f64> = floats.into_no_null_iter().collect();

    let Some(summary) = FiveNumberSummary::from_values(&values) else {
        return Ok((None, Vec::new()));
    };
    let fence = TukeyFence::from_summary(&summary, multiplier);
    Ok((Some(fence), indices_outside(&values, &fence)))
}

/// Remove every row flagged as an outlier in any of `columns`.
///
/// Each column gets its own fence from this table alone. Indices are merged
/// before removal so a row flagged by several columns is dropped once.
pub fn remove_outliers<S>(
    df: &DataFrame,
    columns: &[S],
    multiplier: f64,
) -> PipelineResult<OutlierRemoval>
where
    S: AsRef<str> + Sync,
{
    validate_multiplier(multiplier)?;

    let per_column = columns
        .par_iter()
        .map(|name| {
            let name = name.as_ref();
            fence_and_indices(df, name, multiplier).map(|(fence, indices)| (name, fence, indices))
        })
        .collect::<PipelineResult<Vec<_>>>()?;

    let mut flagged_rows = BTreeSet::new();
    let mut summaries = Vec::with_capacity(per_column.len());
    for (name, fence, indices) in per_column {
        summaries.push(ColumnOutliers {
            column: name.to_string(),
            fence,
            flagged: indices.len(),
        });
        flagged_rows.extend(indices);
    }

    let keep: Vec<bool> = (0..df.height())
        .map(|row| !flagged_rows.contains(&row))
        .collect();
    let table = filter_rows(df, &keep)?;

    Ok(OutlierRemoval {
        table,
        columns: summaries,
        removed: flagged_rows.len(),
    })
}

fn validate_multiplier(multiplier: f64) -> PipelineResult<()> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(())
    } else {
        Err(PipelineError::InvalidMultiplier(multiplier))
    }
}
