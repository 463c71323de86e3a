//! Gaiaclean: Gaia catalog cleaning CLI
//!
//! Cleans raw catalog extracts, combines the three observation fields and
//! prints the descriptive statistics used downstream.

use anyhow::Result;
use clap::Parser;

use gaiaclean::cli::{run_classify, run_clean, run_combine, run_describe, Cli, Commands};
use gaiaclean::pipeline::Sample;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Clean {
            input,
            output,
            report,
            cleaning,
        } => run_clean(input, output.as_deref(), report.as_deref(), cleaning),
        Commands::Combine {
            plane,
            mid_plane,
            perpendicular,
            output,
            report,
            cleaning,
        } => run_combine(
            [
                (plane.as_path(), Sample::GalacticPlane),
                (mid_plane.as_path(), Sample::MidPlane),
                (perpendicular.as_path(), Sample::Perpendicular),
            ],
            output,
            report.as_deref(),
            cleaning,
        ),
        Commands::Classify {
            input,
            output,
            no_confirm,
        } => run_classify(input, output, *no_confirm),
        Commands::Describe { input, rv_bins } => run_describe(input, *rv_bins),
    }
}
