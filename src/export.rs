//! Writes the per-run CSV snapshot.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use thiserror::Error;

use crate::dataset::Dataset;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create csv directory '{0}'")]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("failed to write csv snapshot '{0}'")]
    Write(PathBuf, #[source] csv::Error),
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    location: &'a str,
    temperature: f64,
    humidity: f64,
    condition: &'a str,
    timestamp: String,
}

/// Writes one row per record plus a header row of field names.
pub fn write_snapshot(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|source| ExportError::CreateDir(parent.to_path_buf(), source))?;
    }

    let write = || -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in dataset.records() {
            writer.serialize(CsvRow {
                location: &record.location,
                temperature: record.temperature_c,
                humidity: record.humidity,
                condition: &record.condition,
                timestamp: record.observed_at.format(TIMESTAMP_FORMAT).to_string(),
            })?;
        }
        writer.flush()?;
        Ok(())
    };

    write().map_err(|source| ExportError::Write(path.to_path_buf(), source))?;

    log::info!(
        "csv snapshot saved to '{}' ({} rows)",
        path.display(),
        dataset.len()
    );

    Ok(())
}

// -- Tests -------------------------------------------------------------------
