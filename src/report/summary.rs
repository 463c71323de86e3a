//! Cleaning summary table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{Stage, StageLog};

/// Stage counts for one cleaned table
#[derive(Debug, Clone)]
pub struct SampleSummary {
    pub name: String,
    pub stages: StageLog,
    pub outliers_removed: usize,
}

impl SampleSummary {
    pub fn new(name: impl Into<String>, stages: StageLog, outliers_removed: usize) -> Self {
        Self {
            name: name.into(),
            stages,
            outliers_removed,
        }
    }

    /// Rows in the final table: the last stage that ran.
    pub fn final_rows(&self) -> usize {
        self.stages.stages.last().map(|(_, rows)| *rows).unwrap_or(0)
    }

    /// Rows dropped between the raw and final tables.
    pub fn dropped(&self) -> usize {
        self.stages
            .rows_at(Stage::Raw)
            .unwrap_or(0)
            .saturating_sub(self.final_rows())
    }
}

/// Summary of every sample that went through the pipeline
#[derive(Debug, Default)]
pub struct CleaningSummary {
    pub samples: Vec<SampleSummary>,
    /// Rows in the combined table, when samples were combined
    pub combined_rows: Option<usize>,
}

impl CleaningSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, sample: SampleSummary) {
        self.samples.push(sample);
    }

    pub fn set_combined_rows(&mut self, rows: usize) {
        self.combined_rows = Some(rows);
    }

    /// Render the summary as a table (without the surrounding heading).
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Sample").add_attribute(Attribute::Bold),
            Cell::new("Raw").add_attribute(Attribute::Bold),
            Cell::new("No duplicates").add_attribute(Attribute::Bold),
            Cell::new("Complete").add_attribute(Attribute::Bold),
            Cell::new("Outliers").add_attribute(Attribute::Bold),
            Cell::new("Final").add_attribute(Attribute::Bold),
        ]);

        let count_cell = |value: Option<usize>| match value {
            Some(v) => Cell::new(v).set_alignment(CellAlignment::Right),
            None => Cell::new("-").set_alignment(CellAlignment::Right),
        };

        for sample in &self.samples {
            table.add_row(vec![
                Cell::new(&sample.name),
                count_cell(sample.stages.rows_at(Stage::Raw)),
                count_cell(sample.stages.rows_at(Stage::Deduplicated)),
                count_cell(sample.stages.rows_at(Stage::Complete)),
                Cell::new(sample.outliers_removed)
                    .set_alignment(CellAlignment::Right)
                    .fg(if sample.outliers_removed == 0 {
                        Color::White
                    } else {
                        Color::Red
                    }),
                Cell::new(sample.final_rows())
                    .set_alignment(CellAlignment::Right)
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            ]);
        }

        if let Some(rows) = self.combined_rows {
            table.add_row(vec![
                Cell::new("Combined").add_attribute(Attribute::Bold),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(rows)
                    .set_alignment(CellAlignment::Right)
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            ]);
        }

        table.to_string()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CLEANING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.render().lines() {
            println!("    {}", line);
        }

        let dropped: usize = self.samples.iter().map(SampleSummary::dropped).sum();
        if dropped > 0 {
            println!();
            println!(
                "      {} row(s) dropped across {} sample(s)",
                style(dropped).yellow().bold(),
                self.samples.len()
            );
        }
    }
}
