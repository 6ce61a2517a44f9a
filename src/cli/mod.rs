//! Command line interface.

pub mod command;

use clap::{command, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use command::run::RunArgs;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch current weather, analyze it, and generate charts and a CSV snapshot
    Run(RunArgs),
}

/// Creates a progress bar sized to the number of locations.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("=> "),
    )
}
