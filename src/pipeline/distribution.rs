//! Distribution shape of a single measurement (radial velocity by default)
//!
//! Builds an equal-width histogram and compares it with the normal
//! distribution of the same mean and standard deviation. Residuals are on the
//! square-root scale of a hanging rootogram, where a well-fitting bin sits
//! near zero regardless of its height.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use super::describe::mean_and_std;

/// One histogram bin with its normal-fit comparison
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub observed: usize,
    /// Count the fitted normal distribution places in this bin
    pub expected: f64,
    /// `sqrt(observed) - sqrt(expected)`
    pub residual: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionSummary {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub skewness: f64,
    pub excess_kurtosis: f64,
    pub bins: Vec<HistogramBin>,
}

/// Sturges' rule: `ceil(log2 n) + 1` bins.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Histogram and normal comparison for `values`.
///
/// `bins` overrides Sturges' rule. Returns `None` for fewer than two values
/// or when every value is the same.
pub fn analyze_distribution(values: &[f64], bins: Option<usize>) -> Option<DistributionSummary> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = values.len();
    if n < 2 {
        return None;
    }

    let (mean, std_dev) = mean_and_std(&values);
    if std_dev <= 0.0 || !std_dev.is_finite() {
        return None;
    }

    let (skewness, excess_kurtosis) = shape_moments(&values, mean);
    let normal = Normal::new(mean, std_dev).ok()?;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let k = bins.unwrap_or_else(|| sturges_bins(n)).max(1);
    let width = (max - min) / k as f64;

    let mut observed = vec![0usize; k];
    for &v in &values {
        // Last bin is closed on the right
        let idx = (((v - min) / width).floor() as usize).min(k - 1);
        observed[idx] += 1;
    }

    let bins = observed
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = min + i as f64 * width;
            let upper = if i + 1 == k { max } else { lower + width };
            let expected = n as f64 * (normal.cdf(upper) - normal.cdf(lower));
            HistogramBin {
                lower,
                upper,
                observed: count,
                expected,
                residual: rootogram_residual(count, expected),
            }
        })
        .collect();

    Some(DistributionSummary {
        n,
        mean,
        std_dev,
        skewness,
        excess_kurtosis,
        bins,
    })
}

/// Hanging-rootogram residual for one bin.
pub fn rootogram_residual(observed: usize, expected: f64) -> f64 {
    (observed as f64).sqrt() - expected.max(0.0).sqrt()
}

/// Moment skewness and excess kurtosis.
fn shape_moments(values: &[f64], mean: f64) -> (f64, f64) {
    let n = values.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &v in values {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= n;
    m3 /= n;
    m4 /= n;

    (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
}
