//! Per-column descriptive statistics

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::error::PipelineResult;
use super::outliers::FiveNumberSummary;

/// Descriptive statistics for one numeric column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Non-missing values
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); NaN for a single value
    pub std_dev: f64,
    pub five: FiveNumberSummary,
}

/// Summaries for every numeric column of `df`, in column order.
///
/// Text columns and columns without a single present value are skipped.
pub fn describe_table(df: &DataFrame) -> PipelineResult<Vec<ColumnSummary>> {
    let numeric: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .collect();

    let summaries = numeric
        .par_iter()
        .map(|col| describe_column(col))
        .collect::<PipelineResult<Vec<Option<ColumnSummary>>>>()?;

    Ok(summaries.into_iter().flatten().collect())
}

fn describe_column(col: &Column) -> PipelineResult<Option<ColumnSummary>> {
    let values: Vec<f64> = col
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();

    let Some(five) = FiveNumberSummary::from_values(&values) else {
        return Ok(None);
    };
    let (mean, std_dev) = mean_and_std(&values);

    Ok(Some(ColumnSummary {
        column: col.name().to_string(),
        count: values.len(),
        missing: col.len() - values.len(),
        mean,
        std_dev,
        five,
    }))
}

/// Mean and sample standard deviation (Welford's single pass).
pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &x) in values.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (x - mean);
    }

    let n = values.len();
    if n == 0 {
        return (f64::NAN, f64::NAN);
    }
    let std_dev = if n > 1 {
        (m2 / (n - 1) as f64).sqrt()
    } else {
        f64::NAN
    };
    (mean, std_dev)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let (mean, std) = mean_and_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        // Sample variance = 32 / 7
        assert!((std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_describe_counts_missing() {
        let df = df! {
            "Gmag" => [Some(10.0f64), None, Some(12.0), Some(14.0)],
            "name" => ["a", "b", "c", "d"],
        }
        .unwrap();

        let summaries = describe_table(&df).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].column, "Gmag");
        assert_eq!(summaries[0].count, 3);
        assert_eq!(summaries[0].missing, 1);
        assert_eq!(summaries[0].five.median, 12.0);
    }
}
