mod artifacts;
mod charts;
mod cli;
mod config;
mod dataset;
mod export;
mod fetch;
mod run;
mod stats;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::{command, Cli, Commands};
use run::RunOutcome;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Run(args) => match command::run(args).await {
            Ok(summary) => Ok(exit_code(summary.outcome())),
            Err(e) => {
                eprintln!("Error: {e:#}");
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

fn exit_code(outcome: RunOutcome) -> ExitCode {
    match outcome {
        RunOutcome::Success => ExitCode::SUCCESS,
        RunOutcome::Partial => ExitCode::from(1),
        RunOutcome::NoData => ExitCode::from(2),
    }
}
