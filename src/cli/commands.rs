//! Subcommand runners

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use crate::cli::args::{default_clean_output, CleaningArgs};
use crate::cli::prompts::confirm_overwrite;
use crate::pipeline::{
    analyze_distribution, band_correlations, class_counts, clean_and_filter, coerce_numeric,
    combine_samples, describe_table, error_subset, load_raw_table, load_table, save_table,
    CleanedSample, CleaningConfig, ConsoleObserver, GaiaColumn, LoadOptions, Sample, StageLog,
    Tee, CLASS_COLUMN,
};
use crate::report::{
    print_band_correlations, print_class_counts, print_column_summaries, print_distribution,
    CleaningReport, CleaningSummary, SampleReport, SampleSummary,
};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_success, print_warning,
};

/// Load, clean and filter one raw file, printing stage counts as they happen.
fn clean_file(
    path: &Path,
    options: &LoadOptions,
    config: &CleaningConfig,
) -> Result<(CleanedSample, StageLog)> {
    let spinner = create_spinner(&format!("Loading {}...", path.display()));
    let raw = load_raw_table(path, options)?;
    if raw.height() <= config.header_rows {
        finish_with_warning(&spinner, "File has no observation rows");
    } else {
        finish_with_success(
            &spinner,
            &format!("Loaded {} ({} columns)", path.display(), raw.width()),
        );
    }

    let mut console = ConsoleObserver;
    let mut log = StageLog::new();
    let mut observer = Tee {
        first: &mut console,
        second: &mut log,
    };
    let cleaned = clean_and_filter(&raw, config, &mut observer)
        .with_context(|| format!("Failed to clean {}", path.display()))?;

    for column in &cleaned.outliers {
        if column.flagged > 0 {
            print_count(
                &format!("outlier(s) in {}", column.column),
                column.flagged,
                Some(&format!("(×{:.1} IQR)", config.fence_multiplier)),
            );
        }
    }

    Ok((cleaned, log))
}

fn save_with_spinner(df: &mut DataFrame, path: &Path) -> Result<()> {
    let spinner = create_spinner("Writing output file...");
    save_table(df, path)?;
    finish_with_success(&spinner, &format!("Saved to {}", path.display()));
    Ok(())
}

/// `gaiaclean clean`
pub fn run_clean(
    input: &Path,
    output: Option<&Path>,
    report: Option<&Path>,
    args: &CleaningArgs,
) -> Result<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_clean_output(input));
    let config = args.config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&[input], &output, &config);

    if !confirm_overwrite(&output, args.no_confirm)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    print_step_header(1, "Clean Sample");
    let (cleaned, log) = clean_file(input, &args.load_options(), &config)?;
    print_success("Sample cleaned");

    print_step_header(2, "Save Results");
    let mut table = cleaned.table;
    save_with_spinner(&mut table, &output)?;

    let mut summary = CleaningSummary::new();
    summary.add_sample(SampleSummary::new(
        input.display().to_string(),
        log.clone(),
        cleaned.outliers_removed,
    ));
    summary.display();

    if let Some(report_path) = report {
        let mut cleaning_report = CleaningReport::new(&config);
        cleaning_report.add_sample(
            SampleReport::new("sample", None, input, &log)
                .with_outliers(cleaned.outliers, cleaned.outliers_removed),
        );
        cleaning_report.set_output(&output, table.height(), false);
        cleaning_report.write_json(report_path)?;
        print_info(&format!("Report written to {}", report_path.display()));
    }

    print_completion();
    Ok(())
}

/// `gaiaclean combine`
pub fn run_combine(
    inputs: [(&Path, Sample); 3],
    output: &Path,
    report: Option<&Path>,
    args: &CleaningArgs,
) -> Result<()> {
    let config = args.config();
    let paths: Vec<&Path> = inputs.iter().map(|(path, _)| *path).collect();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&paths, output, &config);

    if !confirm_overwrite(output, args.no_confirm)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    let mut summary = CleaningSummary::new();
    let mut cleaning_report = CleaningReport::new(&config);
    let mut tables = Vec::with_capacity(inputs.len());

    for (step, (path, sample)) in inputs.into_iter().enumerate() {
        print_step_header(
            step as u8 + 1,
            &format!("Clean {} sample (tag {})", sample, sample.tag()),
        );
        let (cleaned, log) = clean_file(path, &args.load_options(), &config)?;

        summary.add_sample(SampleSummary::new(
            sample.label(),
            log.clone(),
            cleaned.outliers_removed,
        ));
        cleaning_report.add_sample(
            SampleReport::new(sample.label(), Some(sample.tag()), path, &log)
                .with_outliers(cleaned.outliers, cleaned.outliers_removed),
        );
        tables.push((cleaned.table, sample));
    }

    print_step_header(4, "Combine Samples");
    let mut combined = combine_samples(&tables).context("Failed to combine samples")?;
    print_success(&format!(
        "Combined {} rows × {} columns",
        combined.height(),
        combined.width()
    ));

    print_step_header(5, "Save Results");
    save_with_spinner(&mut combined, output)?;

    summary.set_combined_rows(combined.height());
    summary.display();

    if let Some(report_path) = report {
        cleaning_report.set_output(output, combined.height(), true);
        cleaning_report.write_json(report_path)?;
        print_info(&format!("Report written to {}", report_path.display()));
    }

    print_completion();
    Ok(())
}

/// `gaiaclean classify`
pub fn run_classify(input: &Path, output: &Path, no_confirm: bool) -> Result<()> {
    if !confirm_overwrite(output, no_confirm)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    let spinner = create_spinner(&format!("Loading {}...", input.display()));
    let df = coerce_numeric(&load_table(input)?)?;
    finish_with_success(&spinner, &format!("Loaded {} rows", df.height()));

    let missing_gmag = df
        .column(GaiaColumn::Gmag.name())
        .map(|c| c.null_count())
        .unwrap_or(0);
    if missing_gmag > 0 {
        print_warning(&format!(
            "{} row(s) without Gmag are left unclassified and excluded",
            missing_gmag
        ));
    }

    let mut subset = error_subset(&df).context("Failed to build error-term subset")?;
    print_class_counts(&class_counts(subset.column(CLASS_COLUMN)?)?);
    println!();

    save_with_spinner(&mut subset, output)?;
    println!(
        "\n    {} rows × {} columns",
        style(subset.height()).yellow(),
        style(subset.width()).yellow()
    );
    Ok(())
}

/// `gaiaclean describe`
pub fn run_describe(input: &Path, rv_bins: Option<usize>) -> Result<()> {
    let spinner = create_spinner(&format!("Loading {}...", input.display()));
    let df = load_table(input)?;
    finish_with_success(&spinner, &format!("Loaded {} rows", df.height()));

    let summaries = describe_table(&df)?;
    print_column_summaries(&summaries);

    let rv_name = GaiaColumn::Rv.name();
    match df.column(rv_name) {
        Ok(rv) => {
            let values: Vec<f64> = rv
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .flatten()
                .collect();
            match analyze_distribution(&values, rv_bins) {
                Some(distribution) => print_distribution(rv_name, &distribution),
                None => print_info("Not enough radial-velocity values for a distribution"),
            }
        }
        Err(_) => print_info("No RV column; skipping distribution analysis"),
    }

    let correlations = band_correlations(&df)?;
    if correlations.is_empty() {
        print_info("No magnitude/flux column pairs found");
    } else {
        print_band_correlations(&correlations);
    }
    println!();

    Ok(())
}
