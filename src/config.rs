//! Run configuration, assembled from the environment and CLI flags.

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

/// Default provider endpoint, overridable with `WEATHER_API_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Cities queried when no `--city` flag is given.
pub const DEFAULT_CITIES: [&str; 7] = [
    "London", "New York", "Tokyo", "Paris", "Sydney", "Berlin", "Dubai",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("WEATHER_API_KEY environment variable is not set or empty")]
    MissingApiKey,

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Plain values consumed by the pipeline. Built once per run, never mutated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub base_url: String,
    pub api_key: String,
    pub locations: Vec<String>,
    pub timeout: Duration,
    pub max_in_flight: usize,
    pub output_dir: PathBuf,
}

impl RunConfig {
    /// Reads provider credentials from the environment. Missing or empty
    /// `WEATHER_API_KEY` is fatal before any fetch is attempted.
    pub fn from_env(
        locations: Vec<String>,
        timeout: Duration,
        max_in_flight: usize,
        output_dir: PathBuf,
    ) -> Result<Self, ConfigError> {
        let api_key = env::var("WEATHER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = env::var("WEATHER_API_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(RunConfig {
            base_url,
            api_key,
            locations,
            timeout,
            max_in_flight,
            output_dir,
        })
    }
}

// -- Tests -------------------------------------------------------------------
