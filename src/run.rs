//! Sequences one run: fetch, aggregate, analyze, render.

use chrono::Local;
use indicatif::ProgressBar;

use crate::{
    artifacts::{self, ArtifactSet},
    charts,
    config::RunConfig,
    dataset::Dataset,
    export,
    fetch::{FetchOutcome, Fetcher},
    stats::{self, StatisticsSummary},
};

/// Outcome of one full pipeline run. Component-local failures are folded
/// in here rather than unwinding the run.
#[derive(Debug)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub artifacts: ArtifactSet,
    pub statistics: Option<StatisticsSummary>,
    pub artifacts_failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every location fetched and every artifact written.
    Success,
    /// Some locations or artifacts failed, but data was produced.
    Partial,
    /// Nothing fetched; analysis and rendering were skipped.
    NoData,
}

impl RunSummary {
    pub fn outcome(&self) -> RunOutcome {
        if self.succeeded == 0 {
            RunOutcome::NoData
        } else if self.failed > 0 || self.artifacts_failed > 0 {
            RunOutcome::Partial
        } else {
            RunOutcome::Success
        }
    }
}

/// Runs the pipeline to completion. Never errors: configuration problems
/// are caught before a run starts, and everything later degrades into the
/// summary.
pub async fn run(fetcher: &Fetcher, config: &RunConfig, bar: &ProgressBar) -> RunSummary {
    let stamp = artifacts::run_stamp(Local::now());

    log::info!(
        "run {stamp}: fetching current conditions for {} locations",
        config.locations.len()
    );
    let outcomes = fetcher
        .fetch_all(&config.locations, config.max_in_flight, bar)
        .await;

    process(outcomes, config, &stamp)
}

/// The post-fetch stages. Split out so the pipeline can be exercised with
/// synthetic fetch outcomes.
fn process(outcomes: Vec<FetchOutcome>, config: &RunConfig, stamp: &str) -> RunSummary {
    log::info!("aggregating {} fetch outcomes", outcomes.len());
    let (dataset, failed) = Dataset::from_outcomes(outcomes);
    let succeeded = dataset.len();

    if dataset.is_empty() {
        log::warn!("no data for this run, skipping analysis and rendering");
        return RunSummary {
            succeeded,
            failed,
            artifacts: ArtifactSet::new(stamp),
            statistics: None,
            artifacts_failed: 0,
        };
    }

    log::info!("analyzing {succeeded} records");
    let statistics = match stats::analyze(&dataset) {
        Ok(summary) => Some(summary),
        Err(e) => {
            log::warn!("skipping analysis: {e}");
            None
        }
    };

    log::info!("rendering artifacts for run {stamp}");
    let mut artifacts = ArtifactSet::new(stamp);
    let mut artifacts_failed = 0;

    if let Some(statistics) = &statistics {
        match charts::render_all(&dataset, statistics, &config.output_dir, stamp) {
            Ok(rendered) => {
                artifacts_failed += rendered.failures.len();
                artifacts.charts = rendered.paths;
            }
            Err(e) => {
                log::error!("chart rendering skipped: {e}");
                artifacts_failed += 1;
            }
        }
    }

    let csv_path = artifacts::csv_path(&config.output_dir, stamp);
    match export::write_snapshot(&dataset, &csv_path) {
        Ok(()) => artifacts.csv = Some(csv_path),
        Err(e) => {
            log::error!("csv snapshot skipped: {e}");
            artifacts_failed += 1;
        }
    }

    log::info!("run {stamp} done: {succeeded} succeeded, {failed} failed");

    RunSummary {
        succeeded,
        failed,
        artifacts,
        statistics,
        artifacts_failed,
    }
}

// -- Tests -------------------------------------------------------------------
