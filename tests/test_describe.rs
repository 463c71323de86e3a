//! Tests for summaries, the radial-velocity distribution and band correlations

use gaiaclean::pipeline::*;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_describe_numeric_columns() {
    let df = df! {
        "Gmag" => [Some(1.0f64), Some(2.0), Some(3.0), Some(4.0), None],
        "label" => ["a", "b", "c", "d", "e"],
        "Dup" => [0i32, 0, 0, 1, 0],
    }
    .unwrap();

    let summaries = describe_table(&df).unwrap();
    let names: Vec<&str> = summaries.iter().map(|s| s.column.as_str()).collect();
    assert_eq!(names, vec!["Gmag", "Dup"]);

    let gmag = &summaries[0];
    assert_eq!(gmag.count, 4);
    assert_eq!(gmag.missing, 1);
    assert!((gmag.mean - 2.5).abs() < 1e-12);
    assert_eq!(gmag.five.min, 1.0);
    assert_eq!(gmag.five.median, 2.5);
    assert_eq!(gmag.five.max, 4.0);
}

#[test]
fn test_describe_skips_all_missing_column() {
    let df = df! {
        "RV" => [None::<f64>, None],
        "Gmag" => [1.0f64, 2.0],
    }
    .unwrap();

    let summaries = describe_table(&df).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].column, "Gmag");
}

#[test]
fn test_distribution_counts_cover_every_value() {
    let table = create_clean_table(200, 0);
    let rv: Vec<f64> = f64_values(&table, "RV").into_iter().flatten().collect();

    let summary = analyze_distribution(&rv, None).unwrap();

    assert_eq!(summary.n, 200);
    assert_eq!(summary.bins.len(), sturges_bins(200));
    let observed: usize = summary.bins.iter().map(|b| b.observed).sum();
    assert_eq!(observed, 200);
    // Expected counts stay within the sample size
    let expected: f64 = summary.bins.iter().map(|b| b.expected).sum();
    assert!(expected > 0.0 && expected <= 200.0);
}

#[test]
fn test_distribution_with_fixed_bins() {
    let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let summary = analyze_distribution(&values, Some(4)).unwrap();

    assert_eq!(summary.bins.len(), 4);
    let counts: Vec<usize> = summary.bins.iter().map(|b| b.observed).collect();
    assert_eq!(counts, vec![25, 25, 25, 25]);
    assert!(summary.skewness.abs() < 1e-6);
    assert_eq!(summary.bins[3].upper, 99.0);
}

#[test]
fn test_distribution_degenerate_inputs() {
    assert!(analyze_distribution(&[], None).is_none());
    assert!(analyze_distribution(&[3.0], None).is_none());
    assert!(analyze_distribution(&[3.0, 3.0, 3.0], None).is_none());
}

#[test]
fn test_magnitude_tracks_log_flux() {
    let table = create_clean_table(50, 0);

    let r = magnitude_flux_correlation(&table, GaiaColumn::Gmag, GaiaColumn::Fg)
        .unwrap()
        .unwrap();

    // Fixture magnitudes are an exact linear function of log10(flux)
    assert!(r < -0.9999, "Expected r close to -1, got {}", r);
}

#[test]
fn test_band_correlations_only_for_present_bands() {
    let table = create_clean_table(20, 0);

    let correlations = band_correlations(&table).unwrap();

    assert_eq!(correlations.len(), 1);
    assert_eq!(correlations[0].magnitude, "Gmag");
    assert_eq!(correlations[0].flux, "FG");
    assert_eq!(correlations[0].pairs, 20);
}

#[test]
fn test_correlation_ignores_nonpositive_flux() {
    let df = df! {
        "Gmag" => [Some(15.0f64), Some(14.0), Some(13.0), Some(12.0), None],
        "FG" => [Some(10.0f64), Some(100.0), Some(-5.0), Some(1000.0), Some(50.0)],
    }
    .unwrap();

    let correlations = band_correlations(&df).unwrap();
    assert_eq!(correlations[0].pairs, 3);
    assert!(correlations[0].correlation.unwrap() < 0.0);
}
