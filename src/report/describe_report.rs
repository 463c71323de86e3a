//! Console rendering for descriptive statistics

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use console::style;

use crate::pipeline::{BandCorrelation, ColumnSummary, DistributionSummary, MagnitudeClass};

fn header(title: &str) {
    println!();
    println!("    {} {}", style("📈").cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn number(value: f64) -> Cell {
    let text = if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.4}", value)
    };
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn bold(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

/// Render the five-number summaries table
pub fn render_column_summaries(summaries: &[ColumnSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        bold("Column"),
        bold("N"),
        bold("Missing"),
        bold("Min"),
        bold("Q1"),
        bold("Median"),
        bold("Q3"),
        bold("Max"),
        bold("Mean"),
        bold("Std"),
    ]);

    for s in summaries {
        table.add_row(vec![
            Cell::new(&s.column),
            Cell::new(s.count).set_alignment(CellAlignment::Right),
            Cell::new(s.missing).set_alignment(CellAlignment::Right),
            number(s.five.min),
            number(s.five.lower_hinge),
            number(s.five.median),
            number(s.five.upper_hinge),
            number(s.five.max),
            number(s.mean),
            number(s.std_dev),
        ]);
    }
    table
}

pub fn print_column_summaries(summaries: &[ColumnSummary]) {
    header("FIVE-NUMBER SUMMARIES");
    print_indented(&render_column_summaries(summaries));
}

/// Print the histogram and rootogram residuals of a distribution
pub fn print_distribution(column: &str, summary: &DistributionSummary) {
    header(&format!("DISTRIBUTION OF {}", column));
    println!(
        "      n = {}   mean = {:.3}   sd = {:.3}   skewness = {:.3}   excess kurtosis = {:.3}",
        summary.n, summary.mean, summary.std_dev, summary.skewness, summary.excess_kurtosis
    );
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        bold("Bin"),
        bold("Observed"),
        bold("Expected"),
        bold("√obs − √exp"),
    ]);
    for bin in &summary.bins {
        table.add_row(vec![
            Cell::new(format!("[{:.2}, {:.2}]", bin.lower, bin.upper)),
            Cell::new(bin.observed).set_alignment(CellAlignment::Right),
            number(bin.expected),
            number(bin.residual),
        ]);
    }
    print_indented(&table);
}

/// Print the magnitude/log-flux correlations
pub fn print_band_correlations(correlations: &[BandCorrelation]) {
    header("MAGNITUDE vs LOG FLUX");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![bold("Magnitude"), bold("Flux"), bold("Pairs"), bold("r")]);
    for c in correlations {
        table.add_row(vec![
            Cell::new(&c.magnitude),
            Cell::new(&c.flux),
            Cell::new(c.pairs).set_alignment(CellAlignment::Right),
            number(c.correlation.unwrap_or(f64::NAN)),
        ]);
    }
    print_indented(&table);
}

/// Print how many rows fall in each magnitude class
pub fn print_class_counts(counts: &[(MagnitudeClass, usize)]) {
    header("MAGNITUDE CLASSES");
    for (class, count) in counts {
        println!("      {:<8} {}", class.as_str(), style(count).yellow().bold());
    }
}
