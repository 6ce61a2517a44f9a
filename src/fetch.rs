//! Fetches current conditions from the weather provider, one request per
//! location.

use chrono::Local;
use futures::{stream, StreamExt};
use indicatif::ProgressBar;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    config::{ConfigError, RunConfig},
    dataset::WeatherRecord,
};

/// One fetch result. A failure is recorded and reported, never fatal.
pub type FetchOutcome = Result<WeatherRecord, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network request failed for {location}")]
    Request {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider returned {status} for {location}")]
    Status {
        location: String,
        status: StatusCode,
    },

    #[error("malformed provider response for {location}")]
    Decode {
        location: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub fn location(&self) -> &str {
        match self {
            FetchError::Request { location, .. }
            | FetchError::Status { location, .. }
            | FetchError::Decode { location, .. } => location,
        }
    }
}

/// Provider payload for `current.json`. Required fields only; a response
/// missing any of them is a decode failure, not a partial record.
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
    humidity: f64,
    condition: ConditionBlock,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    text: String,
}

impl ProviderResponse {
    fn into_record(self, location: &str) -> WeatherRecord {
        WeatherRecord {
            location: location.to_string(),
            temperature_c: self.current.temp_c,
            humidity: self.current.humidity,
            condition: self.current.condition.text,
            observed_at: Local::now(),
        }
    }
}

pub struct Fetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Fetcher {
    /// A client build failure is a configuration problem and aborts the run
    /// before any fetch.
    pub fn new(config: &RunConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Fetcher {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn current_url(&self) -> String {
        format!("{}/current.json", self.base_url)
    }

    /// Fetches current conditions for a single location.
    pub async fn fetch(&self, location: &str) -> FetchOutcome {
        log::debug!("requesting current conditions for {location}");

        let response = self
            .client
            .get(self.current_url())
            .query(&[("key", self.api_key.as_str()), ("q", location), ("aqi", "no")])
            .send()
            .await
            .map_err(|source| FetchError::Request {
                location: location.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status,
            });
        }

        let payload: ProviderResponse =
            response.json().await.map_err(|source| FetchError::Decode {
                location: location.to_string(),
                source,
            })?;

        Ok(payload.into_record(location))
    }

    /// Fetches all locations through a bounded, order-preserving stream.
    /// Each completed request ticks the progress bar; failures are logged
    /// and returned in place so the caller can count them.
    pub async fn fetch_all(
        &self,
        locations: &[String],
        max_in_flight: usize,
        bar: &ProgressBar,
    ) -> Vec<FetchOutcome> {
        let limit = max_in_flight.clamp(1, locations.len().max(1));

        stream::iter(locations.iter().map(|location| {
            let bar = bar.clone();
            async move {
                let outcome = self.fetch(location).await;
                if let Err(e) = &outcome {
                    log::warn!("fetch failed for {}: {e}", e.location());
                }
                bar.inc(1);
                outcome
            }
        }))
        .buffered(limit)
        .collect()
        .await
    }
}

// -- Tests -------------------------------------------------------------------
