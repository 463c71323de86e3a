//! Magnitude-flux relationship
//!
//! Magnitude is logarithmic in flux (`m = -2.5 log10 F + c`), so the
//! relationship is measured on `log10(flux)`, where it should be close to a
//! perfect negative linear correlation.

use polars::prelude::*;
use serde::Serialize;

use super::error::{PipelineError, PipelineResult};
use super::schema::GaiaColumn;

/// Magnitude and flux column for each photometric band.
pub const PHOTOMETRIC_BANDS: [(GaiaColumn, GaiaColumn); 3] = [
    (GaiaColumn::Gmag, GaiaColumn::Fg),
    (GaiaColumn::BpMag, GaiaColumn::Fbp),
    (GaiaColumn::RpMag, GaiaColumn::Frp),
];

/// Correlation between one band's magnitude and log flux
#[derive(Debug, Clone, Serialize)]
pub struct BandCorrelation {
    pub magnitude: String,
    pub flux: String,
    pub pairs: usize,
    pub correlation: Option<f64>,
}

/// Pearson correlation between `magnitude` and `log10(flux)`.
///
/// Only rows with both values present and a strictly positive flux count.
/// Returns `None` with fewer than three such rows or when either side is
/// constant.
pub fn magnitude_flux_correlation(
    df: &DataFrame,
    magnitude: GaiaColumn,
    flux: GaiaColumn,
) -> PipelineResult<Option<f64>> {
    let pairs = log_flux_pairs(df, magnitude, flux)?;
    Ok(pearson_correlation(&pairs))
}

/// Correlations for every band whose columns are present in `df`.
pub fn band_correlations(df: &DataFrame) -> PipelineResult<Vec<BandCorrelation>> {
    let mut out = Vec::new();
    for (magnitude, flux) in PHOTOMETRIC_BANDS {
        if df.column(magnitude.name()).is_err() || df.column(flux.name()).is_err() {
            continue;
        }
        let pairs = log_flux_pairs(df, magnitude, flux)?;
        out.push(BandCorrelation {
            magnitude: magnitude.name().to_string(),
            flux: flux.name().to_string(),
            pairs: pairs.len(),
            correlation: pearson_correlation(&pairs),
        });
    }
    Ok(out)
}

fn log_flux_pairs(
    df: &DataFrame,
    magnitude: GaiaColumn,
    flux: GaiaColumn,
) -> PipelineResult<Vec<(f64, f64)>> {
    let mags = float_column(df, magnitude)?;
    let fluxes = float_column(df, flux)?;

    let pairs = mags
        .f64()?
        .into_iter()
        .zip(fluxes.f64()?.into_iter())
        .filter_map(|(m, f)| match (m, f) {
            (Some(m), Some(f)) if m.is_finite() && f.is_finite() && f > 0.0 => {
                Some((m, f.log10()))
            }
            _ => None,
        })
        .collect();

    Ok(pairs)
}

fn float_column(df: &DataFrame, column: GaiaColumn) -> PipelineResult<Column> {
    let col = df
        .column(column.name())
        .map_err(|_| PipelineError::missing_column(column.name(), df))?;
    Ok(col.cast(&DataType::Float64)?)
}

/// Pearson correlation using a single-pass Welford update.
pub fn pearson_correlation(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 3 {
        return None;
    }

    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for &(x, y) in pairs {
        n += 1.0;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / n;
        mean_y += dy / n;
        var_x += dx * (x - mean_x);
        var_y += dy * (y - mean_y);
        cov_xy += dx * (y - mean_y);
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov_xy / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive() {
        let pairs: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        let r = pearson_correlation(&pairs).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_side() {
        let pairs = [(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)];
        assert!(pearson_correlation(&pairs).is_none());
    }

    #[test]
    fn test_too_few_pairs() {
        assert!(pearson_correlation(&[(1.0, 2.0), (2.0, 3.0)]).is_none());
    }
}
