//! Deterministic, timestamp-qualified artifact naming.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Generated file paths for one run, tagged with the run stamp. Artifacts
/// are left on disk; the core never cleans them up.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSet {
    pub stamp: String,
    pub charts: Vec<PathBuf>,
    pub csv: Option<PathBuf>,
}

impl ArtifactSet {
    pub fn new(stamp: &str) -> Self {
        ArtifactSet {
            stamp: stamp.to_string(),
            charts: Vec::new(),
            csv: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty() && self.csv.is_none()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.charts.iter().chain(self.csv.iter())
    }
}

/// Millisecond-resolution stamp, e.g. `20240715_142301_042`. Qualifies
/// every filename of a run so successive runs never collide.
pub fn run_stamp(now: DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S_%3f").to_string()
}

pub fn charts_dir(output_dir: &Path) -> PathBuf {
    output_dir.join("charts")
}

pub fn csv_dir(output_dir: &Path) -> PathBuf {
    output_dir.join("csv")
}

pub fn chart_path(output_dir: &Path, chart: &str, stamp: &str) -> PathBuf {
    charts_dir(output_dir).join(format!("{chart}_{stamp}.png"))
}

pub fn csv_path(output_dir: &Path, stamp: &str) -> PathBuf {
    csv_dir(output_dir).join(format!("weather_data_{stamp}.csv"))
}

// -- Tests -------------------------------------------------------------------
