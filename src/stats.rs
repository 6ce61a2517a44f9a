//! Descriptive statistics over one run's dataset.

use thiserror::Error;

use crate::dataset::Dataset;

#[derive(Debug, Error)]
#[error("dataset is empty, statistics are undefined")]
pub struct InsufficientDataError;

/// Per-field descriptive statistics. `std_dev` is the population standard
/// deviation (divide by N, not N - 1).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStats {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl FieldStats {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    fn describe(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mean = mean(values);

        Some(FieldStats {
            mean,
            median: median(values),
            std_dev: population_std_dev(values, mean),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CityReading {
    pub location: String,
    pub temperature_c: f64,
}

#[derive(Debug, Clone)]
pub struct StatisticsSummary {
    pub temperature: FieldStats,
    pub humidity: FieldStats,
    /// Pearson's r between temperature and humidity. `None` when undefined
    /// (fewer than two records, or zero variance in either field).
    pub correlation: Option<f64>,
    pub hottest: CityReading,
    pub coldest: CityReading,
}

impl StatisticsSummary {
    pub fn correlation_interpretation(&self) -> &'static str {
        match self.correlation {
            None => "N/A (insufficient variation)",
            Some(r) if r > 0.5 => "strong positive correlation",
            Some(r) if r > 0.0 => "weak positive correlation",
            Some(r) if r > -0.5 => "weak negative correlation",
            Some(_) => "strong negative correlation",
        }
    }
}

/// Computes the summary for a non-empty dataset.
pub fn analyze(dataset: &Dataset) -> Result<StatisticsSummary, InsufficientDataError> {
    if dataset.is_empty() {
        return Err(InsufficientDataError);
    }

    let temperatures = dataset.temperatures();
    let humidities = dataset.humidities();

    // describe() only fails on empty input, guarded above
    let temperature = FieldStats::describe(&temperatures).ok_or(InsufficientDataError)?;
    let humidity = FieldStats::describe(&humidities).ok_or(InsufficientDataError)?;

    let hottest = dataset
        .records()
        .iter()
        .max_by(|a, b| a.temperature_c.total_cmp(&b.temperature_c))
        .map(|r| CityReading {
            location: r.location.clone(),
            temperature_c: r.temperature_c,
        })
        .ok_or(InsufficientDataError)?;

    let coldest = dataset
        .records()
        .iter()
        .min_by(|a, b| a.temperature_c.total_cmp(&b.temperature_c))
        .map(|r| CityReading {
            location: r.location.clone(),
            temperature_c: r.temperature_c,
        })
        .ok_or(InsufficientDataError)?;

    Ok(StatisticsSummary {
        temperature,
        humidity,
        correlation: pearson(&temperatures, &humidities),
        hottest,
        coldest,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Conventional median: middle value, or the mean of the two middle values
/// for an even count.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Pearson's correlation coefficient, `None` when the denominator is zero.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() < 2 || xs.len() != ys.len() {
        return None;
    }

    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let covariance: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let var_x: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    let var_y: f64 = ys.iter().map(|y| (y - mean_y).powi(2)).sum();

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        return None;
    }

    Some(covariance / denominator)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, WeatherRecord};
    use chrono::Local;

    fn dataset_fixture(rows: &[(&str, f64, f64)]) -> Dataset {
        let outcomes = rows
            .iter()
            .map(|(location, temperature_c, humidity)| {
                Ok(WeatherRecord {
                    location: location.to_string(),
                    temperature_c: *temperature_c,
                    humidity: *humidity,
                    condition: "Sunny".to_string(),
                    observed_at: Local::now(),
                })
            })
            .collect();

        Dataset::from_outcomes(outcomes).0
    }

    #[test]
    fn should_fail_on_empty_dataset() {
        let dataset = dataset_fixture(&[]);

        assert!(analyze(&dataset).is_err());
    }

    #[test]
    fn should_bound_mean_by_min_and_max() {
        let dataset = dataset_fixture(&[
            ("London", 14.0, 82.0),
            ("Tokyo", 22.0, 60.0),
            ("Dubai", 41.0, 18.0),
        ]);

        let summary = analyze(&dataset).unwrap();

        assert!(summary.temperature.mean >= summary.temperature.min);
        assert!(summary.temperature.mean <= summary.temperature.max);
        assert!(summary.humidity.mean >= summary.humidity.min);
        assert!(summary.humidity.mean <= summary.humidity.max);
    }

    #[test]
    fn should_report_zero_std_dev_and_no_correlation_for_single_record() {
        let dataset = dataset_fixture(&[("London", 14.0, 82.0)]);

        let summary = analyze(&dataset).unwrap();

        assert_eq!(summary.temperature.std_dev, 0.0);
        assert_eq!(summary.correlation, None);
        assert_eq!(
            summary.correlation_interpretation(),
            "N/A (insufficient variation)"
        );
    }

    #[test]
    fn should_use_population_std_dev() {
        // population std dev of [2, 4, 6] is sqrt(8/3)
        let dataset = dataset_fixture(&[
            ("A", 2.0, 50.0),
            ("B", 4.0, 50.0),
            ("C", 6.0, 50.0),
        ]);

        let summary = analyze(&dataset).unwrap();

        assert!((summary.temperature.std_dev - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn should_average_middle_values_for_even_count() {
        assert_eq!(median(&[1.0, 3.0, 2.0, 10.0]), 2.5);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn should_report_no_correlation_when_variance_is_zero() {
        let dataset = dataset_fixture(&[
            ("London", 14.0, 82.0),
            ("Tokyo", 22.0, 82.0),
            ("Dubai", 41.0, 82.0),
        ]);

        let summary = analyze(&dataset).unwrap();

        assert_eq!(summary.correlation, None);
    }

    #[test]
    fn should_detect_perfect_negative_correlation() {
        let dataset = dataset_fixture(&[
            ("London", 10.0, 90.0),
            ("Tokyo", 20.0, 80.0),
            ("Dubai", 30.0, 70.0),
        ]);

        let summary = analyze(&dataset).unwrap();

        let r = summary.correlation.unwrap();
        assert!((r + 1.0).abs() < 1e-12);
        assert_eq!(
            summary.correlation_interpretation(),
            "strong negative correlation"
        );
    }

    #[test]
    fn should_identify_hottest_and_coldest_cities() {
        let dataset = dataset_fixture(&[
            ("London", 14.0, 82.0),
            ("Dubai", 41.0, 18.0),
            ("Tokyo", 22.0, 60.0),
        ]);

        let summary = analyze(&dataset).unwrap();

        assert_eq!(summary.hottest.location, "Dubai");
        assert_eq!(summary.coldest.location, "London");
        assert_eq!(summary.temperature.range(), 27.0);
    }
}
