//! Complete-case filtering

use polars::prelude::*;

use super::error::PipelineResult;

/// Keep only rows with no missing value in any column.
///
/// A null anywhere in the row excludes the whole row; NaN in a float column
/// counts as missing. No imputation happens.
pub fn complete_cases(df: &DataFrame) -> PipelineResult<DataFrame> {
    let mask = complete_mask(df)?;
    Ok(df.filter(&mask)?)
}

/// Number of rows with at least one missing cell.
pub fn incomplete_row_count(df: &DataFrame) -> PipelineResult<usize> {
    let mask = complete_mask(df)?;
    Ok(mask.into_iter().filter(|&complete| complete != Some(true)).count())
}

/// `true` for every row whose cells are all present.
pub fn complete_flags(df: &DataFrame) -> PipelineResult<Vec<bool>> {
    let mask = complete_mask(df)?;
    Ok(mask.into_iter().map(|complete| complete == Some(true)).collect())
}

/// Row mask of complete cases, built column by column with polars kernels
/// so chunked tables need no rechunk.
pub fn complete_mask(df: &DataFrame) -> PipelineResult<BooleanChunked> {
    let mut mask = BooleanChunked::full("complete".into(), true, df.height());

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if series.null_count() > 0 {
            mask = &mask & &series.is_not_null();
        }

        if series.dtype().is_float() {
            let floats = series.cast(&DataType::Float64)?;
            let not_nan = floats.f64()?.is_not_nan().fill_null_with_values(false)?;
            mask = &mask & &not_nan;
        }
    }

    Ok(mask)
}

/// Filter `df` to the rows where `keep` is true. `keep` must have one entry per row.
pub(crate) fn filter_rows(df: &DataFrame, keep: &[bool]) -> PipelineResult<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}
