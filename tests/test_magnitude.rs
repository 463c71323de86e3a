//! Tests for magnitude classes and the error-term subset

use gaiaclean::pipeline::*;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn labels(column: &Column) -> Vec<Option<String>> {
    column
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect()
}

#[test]
fn test_nine_magnitudes_split_evenly() {
    let df = df! {
        "Gmag" => [15.0f64, 9.0, 12.0, 17.0, 10.0, 14.0, 11.0, 16.0, 13.0],
    }
    .unwrap();

    let classes = classify_magnitudes(&df).unwrap();
    let counts = class_counts(&classes).unwrap();

    assert_eq!(
        counts,
        vec![
            (MagnitudeClass::Bright, 3),
            (MagnitudeClass::Medium, 3),
            (MagnitudeClass::Dim, 3),
        ]
    );

    // Row order follows the input, not the sort
    let got = labels(&classes);
    assert_eq!(got[0].as_deref(), Some("Dim"));
    assert_eq!(got[1].as_deref(), Some("Bright"));
    assert_eq!(got[5].as_deref(), Some("Medium"));
}

#[test]
fn test_missing_magnitude_gets_no_class() {
    let df = df! {
        "Gmag" => [Some(10.0f64), None, Some(12.0), Some(14.0)],
    }
    .unwrap();

    let got = labels(&classify_magnitudes(&df).unwrap());
    assert_eq!(got[1], None);
    assert!(got[0].is_some() && got[2].is_some() && got[3].is_some());
}

#[test]
fn test_ties_at_cut_stay_together() {
    let df = df! {
        "Gmag" => [10.0f64, 10.0, 10.0, 10.0, 11.0, 12.0],
    }
    .unwrap();

    let counts = class_counts(&classify_magnitudes(&df).unwrap()).unwrap();
    // Cuts are the 2nd and 4th values: both 10.0
    assert_eq!(counts[0], (MagnitudeClass::Bright, 4));
    assert_eq!(counts[1], (MagnitudeClass::Medium, 0));
    assert_eq!(counts[2], (MagnitudeClass::Dim, 2));
}

#[test]
fn test_error_subset_columns() {
    let tables = vec![
        (create_clean_table(9, 0), Sample::GalacticPlane),
        (create_clean_table(6, 50), Sample::MidPlane),
    ];
    let combined = combine_samples(&tables).unwrap();

    let subset = error_subset(&combined).unwrap();

    let names: Vec<String> = subset.get_column_names().iter().map(|s| s.to_string()).collect();
    assert_eq!(names, vec!["e_FG", "e_Gmag", SAMPLE_COLUMN, CLASS_COLUMN]);
    assert_eq!(subset.height(), 15);
}

#[test]
fn test_error_subset_drops_unclassified_rows() {
    let df = df! {
        "Gmag" => [Some(10.0f64), None, Some(12.0)],
        "e_Gmag" => [0.01f64, 0.02, 0.03],
    }
    .unwrap();

    let subset = error_subset(&df).unwrap();

    assert_shape(&subset, 2, 2);
    assert_eq!(f64_values(&subset, "e_Gmag"), vec![Some(0.01), Some(0.03)]);
}

#[test]
fn test_error_subset_requires_error_columns() {
    let df = df! { "Gmag" => [10.0f64] }.unwrap();
    assert!(matches!(
        error_subset(&df),
        Err(PipelineError::MissingColumn { .. })
    ));
}

#[test]
fn test_classify_requires_gmag() {
    let df = df! { "e_Gmag" => [0.1f64] }.unwrap();
    assert!(matches!(
        classify_magnitudes(&df),
        Err(PipelineError::MissingColumn { .. })
    ));
}

#[test]
fn test_error_subset_keeps_integer_sample_tags() {
    let combined = combine_samples(&[
        (create_clean_table(4, 0), Sample::GalacticPlane),
        (create_clean_table(4, 20), Sample::Perpendicular),
    ])
    .unwrap();
    // Reloaded tables are coerced wholesale, sample tag included
    let coerced = coerce_numeric(&combined).unwrap();
    assert_eq!(coerced.column(SAMPLE_COLUMN).unwrap().dtype(), &DataType::Float64);

    let subset = error_subset(&coerced).unwrap();

    let tags = subset.column(SAMPLE_COLUMN).unwrap();
    assert_eq!(tags.dtype(), &DataType::Int32);
    let tags: Vec<i32> = tags.i32().unwrap().into_no_null_iter().collect();
    assert_eq!(tags, vec![1, 1, 1, 1, 3, 3, 3, 3]);
}
