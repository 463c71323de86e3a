//! Gaiaclean: Gaia catalog cleaning library
//!
//! Turns raw Gaia catalog extracts into analysis-ready tables: unit rows are
//! stripped, cells coerced to numbers, duplicates and incomplete rows
//! dropped, outliers optionally removed, and samples combined with a tag.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
