//! CLI module - argument parsing, prompts and subcommand runners

pub mod args;
pub mod commands;
pub mod prompts;

pub use args::{default_clean_output, CleaningArgs, Cli, Commands};
pub use commands::*;
pub use prompts::*;
