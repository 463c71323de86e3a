//! Duplicate-observation filtering

use polars::prelude::*;

use super::complete::filter_rows;
use super::error::{PipelineError, PipelineResult};

/// Flag value marking a row as a duplicate observation.
const DUPLICATE_FLAG: f64 = 1.0;

/// Remove rows whose duplicate flag is exactly 1.
///
/// Rows with a missing flag survive this stage; the complete-case filter
/// handles them separately.
pub fn remove_duplicates(df: &DataFrame, dup_column: &str) -> PipelineResult<DataFrame> {
    let keep = keep_flags(df, dup_column)?;
    filter_rows(df, &keep)
}

/// Number of rows flagged as duplicates.
pub fn duplicate_count(df: &DataFrame, dup_column: &str) -> PipelineResult<usize> {
    let keep = keep_flags(df, dup_column)?;
    Ok(keep.iter().filter(|&&k| !k).count())
}

/// `true` for every row that is not flagged as a duplicate.
fn keep_flags(df: &DataFrame, dup_column: &str) -> PipelineResult<Vec<bool>> {
    let column = df
        .column(dup_column)
        .map_err(|_| PipelineError::missing_column(dup_column, df))?;

    let flags = column.cast(&DataType::Float64)?;
    let keep = flags
        .f64()?
        .into_iter()
        .map(|flag| flag != Some(DUPLICATE_FLAG))
        .collect();

    Ok(keep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_flag_survives() {
        let df = df! {
            "Dup" => [Some(0.0f64), Some(1.0), None, Some(1.0)],
            "Gmag" => [10.0f64, 11.0, 12.0, 13.0],
        }
        .unwrap();

        let kept = remove_duplicates(&df, "Dup").unwrap();
        let mags: Vec<f64> = kept.column("Gmag").unwrap().f64().unwrap().into_no_null_iter().collect();
        assert_eq!(mags, vec![10.0, 12.0]);
        assert_eq!(duplicate_count(&df, "Dup").unwrap(), 2);
    }

    #[test]
    fn test_missing_dup_column() {
        let df = df! { "Gmag" => [10.0f64] }.unwrap();
        let err = remove_duplicates(&df, "Dup").unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { .. }));
    }
}
