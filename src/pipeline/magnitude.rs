//! Magnitude classes and the error-term subset
//!
//! The error-term analysis asks whether measurement errors predict how bright
//! a star is. Magnitudes are split into terciles (lower magnitude means
//! brighter) and the resulting label is attached to the error columns.

use std::fmt;

use polars::prelude::*;
use serde::Serialize;

use super::complete::filter_rows;
use super::error::{PipelineError, PipelineResult};
use super::schema::{GaiaColumn, CLASS_COLUMN, SAMPLE_COLUMN};

/// Brightness tercile of an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MagnitudeClass {
    Bright,
    Medium,
    Dim,
}

impl MagnitudeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            MagnitudeClass::Bright => "Bright",
            MagnitudeClass::Medium => "Medium",
            MagnitudeClass::Dim => "Dim",
        }
    }
}

impl fmt::Display for MagnitudeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tercile boundaries over the non-missing magnitudes.
///
/// With `n` sorted values the cuts are the `ceil(n/3)`-th and `ceil(2n/3)`-th
/// values (1-based). Returns `None` when no value is present.
pub fn magnitude_cut_points<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut sorted: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let first = n.div_ceil(3);
    let second = (2 * n).div_ceil(3);
    Some((sorted[first - 1], sorted[second - 1]))
}

/// Class of a single magnitude given the tercile cuts.
pub fn classify(magnitude: f64, (first, second): (f64, f64)) -> MagnitudeClass {
    if magnitude <= first {
        MagnitudeClass::Bright
    } else if magnitude <= second {
        MagnitudeClass::Medium
    } else {
        MagnitudeClass::Dim
    }
}

/// The `mag_class` column for every row of `df`.
///
/// Rows with a missing `Gmag` get a null label; they are never forced into a
/// class.
pub fn classify_magnitudes(df: &DataFrame) -> PipelineResult<Column> {
    let magnitudes = magnitude_values(df)?;
    let cuts = magnitude_cut_points(magnitudes.iter().copied());

    let labels: Vec<Option<&str>> = magnitudes
        .iter()
        .map(|mag| {
            let mag = mag.filter(|m| !m.is_nan())?;
            let cuts = cuts?;
            Some(classify(mag, cuts).as_str())
        })
        .collect();

    Ok(Column::new(CLASS_COLUMN.into(), labels))
}

/// Error columns, the sample tag (if present, as `Int32`) and `mag_class`.
///
/// Rows without a class label are dropped so every row of the subset can be
/// used as a training example.
pub fn error_subset(df: &DataFrame) -> PipelineResult<DataFrame> {
    let mut columns: Vec<Column> = GaiaColumn::error_terms()
        .filter_map(|c| df.column(c.name()).ok().cloned())
        .collect();

    if columns.is_empty() {
        return Err(PipelineError::missing_column(GaiaColumn::EPlx.name(), df));
    }

    // Tags stay integers even when the whole table was coerced to floats
    if let Ok(sample) = df.column(SAMPLE_COLUMN) {
        columns.push(sample.cast(&DataType::Int32)?);
    }

    let labels = classify_magnitudes(df)?;
    let keep: Vec<bool> = labels
        .str()?
        .into_iter()
        .map(|label| label.is_some())
        .collect();
    columns.push(labels);

    let subset = DataFrame::new(columns)?;
    filter_rows(&subset, &keep)
}

/// Count of each class among the labels in `column`.
pub fn class_counts(column: &Column) -> PipelineResult<Vec<(MagnitudeClass, usize)>> {
    let labels = column.str()?;
    let classes = [
        MagnitudeClass::Bright,
        MagnitudeClass::Medium,
        MagnitudeClass::Dim,
    ];

    Ok(classes
        .into_iter()
        .map(|class| {
            let count = labels
                .into_iter()
                .filter(|label| *label == Some(class.as_str()))
                .count();
            (class, count)
        })
        .collect())
}

fn magnitude_values(df: &DataFrame) -> PipelineResult<Vec<Option<f64>>> {
    let name = GaiaColumn::Gmag.name();
    let column = df
        .column(name)
        .map_err(|_| PipelineError::missing_column(name, df))?;

    Ok(column.cast(&DataType::Float64)?.f64()?.into_iter().collect())
}
