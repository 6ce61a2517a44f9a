//! The `run` command: the full fetch, analyze, render pipeline.

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Args;

use crate::{
    cli::create_progress_bar,
    config::{RunConfig, DEFAULT_CITIES},
    fetch::Fetcher,
    run::{self, RunSummary},
};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// City to fetch; repeat the flag for several (defaults to the built-in list)
    #[arg(long = "city", value_name = "NAME")]
    pub cities: Vec<String>,

    /// Directory for generated charts and CSV snapshots
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Maximum number of requests in flight
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,
}

pub async fn run(args: &RunArgs) -> Result<RunSummary> {
    let locations = if args.cities.is_empty() {
        DEFAULT_CITIES.iter().map(|city| city.to_string()).collect()
    } else {
        args.cities.clone()
    };

    let config = RunConfig::from_env(
        locations,
        Duration::from_secs(args.timeout),
        args.concurrency,
        args.output_dir.clone(),
    )?;
    let fetcher = Fetcher::new(&config)?;

    let bar = create_progress_bar(
        config.locations.len() as u64,
        "Fetching current conditions...".to_string(),
    );
    let summary = run::run(&fetcher, &config, &bar).await;
    bar.finish_with_message("Fetch complete");

    report(&summary);

    Ok(summary)
}

fn report(summary: &RunSummary) {
    println!();
    println!(
        "Run complete: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );

    match &summary.statistics {
        Some(stats) => {
            println!();
            println!("Temperature (°C)");
            println!(
                "  mean {:.2}   median {:.2}   std dev {:.2}   min {:.2}   max {:.2}",
                stats.temperature.mean,
                stats.temperature.median,
                stats.temperature.std_dev,
                stats.temperature.min,
                stats.temperature.max,
            );
            println!("Humidity (%)");
            println!(
                "  mean {:.2}   median {:.2}   std dev {:.2}   min {:.2}   max {:.2}",
                stats.humidity.mean,
                stats.humidity.median,
                stats.humidity.std_dev,
                stats.humidity.min,
                stats.humidity.max,
            );
            println!(
                "Hottest: {} ({:.1} °C)   Coldest: {} ({:.1} °C)",
                stats.hottest.location,
                stats.hottest.temperature_c,
                stats.coldest.location,
                stats.coldest.temperature_c,
            );
            match stats.correlation {
                Some(r) => println!(
                    "Temperature-humidity correlation: {:.4} ({})",
                    r,
                    stats.correlation_interpretation()
                ),
                None => println!("Temperature-humidity correlation: N/A"),
            }
        }
        None => println!("No data retrieved; analysis and charts were skipped"),
    }

    if !summary.artifacts.is_empty() {
        println!();
        println!("Artifacts:");
        for path in summary.artifacts.paths() {
            println!("  {}", path.display());
        }
    }

    if summary.artifacts_failed > 0 {
        println!(
            "{} artifact(s) could not be generated",
            summary.artifacts_failed
        );
    }
}
