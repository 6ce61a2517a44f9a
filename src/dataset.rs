//! In-memory tabular dataset for one run, one row per location.

use chrono::{DateTime, Local};

use crate::fetch::FetchOutcome;

#[derive(Debug, Clone)]
pub struct WeatherRecord {
    pub location: String,
    pub temperature_c: f64,
    pub humidity: f64,
    pub condition: String,
    pub observed_at: DateTime<Local>,
}

/// Successful records in configured order, unique by location.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<WeatherRecord>,
}

impl Dataset {
    /// Folds fetch outcomes into a dataset and a failure count. Successes
    /// keep their input order; a duplicate location is dropped (first record
    /// wins) and counts as neither success nor failure.
    pub fn from_outcomes(outcomes: Vec<FetchOutcome>) -> (Self, usize) {
        let mut records: Vec<WeatherRecord> = Vec::new();
        let mut failed = 0;

        for outcome in outcomes {
            match outcome {
                Ok(record) => {
                    if records.iter().any(|r| r.location == record.location) {
                        log::warn!("dropping duplicate record for {}", record.location);
                        continue;
                    }
                    records.push(record);
                }
                Err(_) => failed += 1,
            }
        }

        (Dataset { records }, failed)
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.temperature_c).collect()
    }

    pub fn humidities(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.humidity).collect()
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use reqwest::StatusCode;

    fn record_fixture(location: &str, temperature_c: f64, humidity: f64) -> WeatherRecord {
        WeatherRecord {
            location: location.to_string(),
            temperature_c,
            humidity,
            condition: "Sunny".to_string(),
            observed_at: Local::now(),
        }
    }

    fn failure_fixture(location: &str) -> FetchOutcome {
        Err(FetchError::Status {
            location: location.to_string(),
            status: StatusCode::BAD_REQUEST,
        })
    }

    #[test]
    fn should_keep_successes_in_input_order() {
        let outcomes = vec![
            Ok(record_fixture("London", 14.0, 82.0)),
            failure_fixture("NoSuchCityXYZ123"),
            Ok(record_fixture("Tokyo", 22.0, 60.0)),
        ];

        let (dataset, failed) = Dataset::from_outcomes(outcomes);

        assert_eq!(failed, 1);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].location, "London");
        assert_eq!(dataset.records()[1].location, "Tokyo");
    }

    #[test]
    fn should_drop_duplicate_locations() {
        let outcomes = vec![
            Ok(record_fixture("London", 14.0, 82.0)),
            Ok(record_fixture("London", 15.5, 80.0)),
        ];

        let (dataset, failed) = Dataset::from_outcomes(outcomes);

        assert_eq!(failed, 0);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].temperature_c, 14.0);
    }

    #[test]
    fn should_produce_empty_dataset_from_no_outcomes() {
        let (dataset, failed) = Dataset::from_outcomes(vec![]);

        assert_eq!(failed, 0);
        assert!(dataset.is_empty());
    }

    #[test]
    fn should_extract_numeric_columns() {
        let outcomes = vec![
            Ok(record_fixture("London", 14.0, 82.0)),
            Ok(record_fixture("Tokyo", 22.0, 60.0)),
        ];
        let (dataset, _) = Dataset::from_outcomes(outcomes);

        assert_eq!(dataset.temperatures(), vec![14.0, 22.0]);
        assert_eq!(dataset.humidities(), vec![82.0, 60.0]);
    }
}
