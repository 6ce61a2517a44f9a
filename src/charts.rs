//! Renders the per-run chart set with plotters.

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use plotters::prelude::*;
use thiserror::Error as ThisError;

use crate::{
    artifacts::{chart_path, charts_dir},
    dataset::Dataset,
    stats::StatisticsSummary,
};

const CHART_SIZE: (u32, u32) = (1280, 720);

#[derive(Debug, ThisError)]
pub enum RenderError {
    #[error("no records to chart")]
    EmptyDataset,

    #[error("failed to create charts directory '{0}'")]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("failed to render {chart} chart: {message}")]
    Backend { chart: &'static str, message: String },
}

/// Paths of the charts that rendered, plus the failures that were skipped.
#[derive(Debug, Default)]
pub struct RenderedCharts {
    pub paths: Vec<PathBuf>,
    pub failures: Vec<RenderError>,
}

/// Renders the full chart set. An empty dataset is an error; an individual
/// chart failure is recorded and the remaining charts still render.
pub fn render_all(
    dataset: &Dataset,
    stats: &StatisticsSummary,
    output_dir: &Path,
    stamp: &str,
) -> Result<RenderedCharts, RenderError> {
    if dataset.is_empty() {
        return Err(RenderError::EmptyDataset);
    }

    let dir = charts_dir(output_dir);
    fs::create_dir_all(&dir).map_err(|source| RenderError::CreateDir(dir.clone(), source))?;

    let mut rendered = RenderedCharts::default();
    let mut record = |chart: &'static str, path: PathBuf, result: Result<(), Box<dyn Error>>| {
        match result {
            Ok(()) => {
                log::info!("{chart} chart saved to '{}'", path.display());
                rendered.paths.push(path);
            }
            Err(e) => {
                let failure = RenderError::Backend {
                    chart,
                    message: e.to_string(),
                };
                log::error!("{failure}");
                rendered.failures.push(failure);
            }
        }
    };

    let path = chart_path(output_dir, "overview", stamp);
    record("overview", path.clone(), overview_chart(dataset, &path));

    let path = chart_path(output_dir, "temperature_comparison", stamp);
    record(
        "temperature_comparison",
        path.clone(),
        temperature_chart(dataset, &path),
    );

    let path = chart_path(output_dir, "humidity_distribution", stamp);
    record(
        "humidity_distribution",
        path.clone(),
        humidity_chart(dataset, &path),
    );

    let path = chart_path(output_dir, "temp_humidity_scatter", stamp);
    record(
        "temp_humidity_scatter",
        path.clone(),
        scatter_chart(dataset, stats.correlation, &path),
    );

    let path = chart_path(output_dir, "weather_conditions", stamp);
    record(
        "weather_conditions",
        path.clone(),
        conditions_chart(dataset, &path),
    );

    Ok(rendered)
}

/// Temperature color bands matching the report's reading of the data.
fn temp_color(temperature_c: f64) -> RGBColor {
    if temperature_c > 30.0 {
        RGBColor(255, 68, 68)
    } else if temperature_c > 20.0 {
        RGBColor(255, 140, 0)
    } else if temperature_c > 10.0 {
        RGBColor(78, 205, 196)
    } else {
        RGBColor(52, 152, 219)
    }
}

fn padded_range(values: &[f64], from_zero: bool) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = ((max - min) * 0.15).max(1.0);

    if from_zero {
        (min.min(0.0) - if min < 0.0 { pad } else { 0.0 }, max + pad)
    } else {
        (min - pad, max + pad)
    }
}

/// Temperature and humidity lines per city on a shared axis.
fn overview_chart(dataset: &Dataset, path: &Path) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = dataset.records().iter().map(|r| r.location.clone()).collect();
    let temperatures = dataset.temperatures();
    let humidities = dataset.humidities();
    let n = labels.len() as i32;

    let all: Vec<f64> = temperatures.iter().chain(&humidities).copied().collect();
    let (y_min, y_max) = padded_range(&all, true);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("City Temperature & Humidity Overview", ("sans-serif", 36))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|seg| segment_label(seg, &labels))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    chart
        .draw_series(
            LineSeries::new(
                temperatures
                    .iter()
                    .enumerate()
                    .map(|(i, t)| (SegmentValue::CenterOf(i as i32), *t)),
                RED.stroke_width(3),
            )
            .point_size(5),
        )?
        .label("Temperature (°C)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(3)));

    chart
        .draw_series(
            LineSeries::new(
                humidities
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (SegmentValue::CenterOf(i as i32), *h)),
                BLUE.stroke_width(3),
            )
            .point_size(5),
        )?
        .label("Humidity (%)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(3)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Ranked temperature bars, color banded by the temperature itself.
fn temperature_chart(dataset: &Dataset, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut ranked: Vec<(String, f64)> = dataset
        .records()
        .iter()
        .map(|r| (r.location.clone(), r.temperature_c))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let values: Vec<f64> = ranked.iter().map(|(_, t)| *t).collect();
    let labels: Vec<String> = ranked.into_iter().map(|(city, _)| city).collect();

    bar_chart(
        path,
        "Temperature Comparison Across Cities",
        "°C",
        &labels,
        &values,
        temp_color,
    )
}

/// Ranked humidity bars.
fn humidity_chart(dataset: &Dataset, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut ranked: Vec<(String, f64)> = dataset
        .records()
        .iter()
        .map(|r| (r.location.clone(), r.humidity))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let values: Vec<f64> = ranked.iter().map(|(_, h)| *h).collect();
    let labels: Vec<String> = ranked.into_iter().map(|(city, _)| city).collect();

    bar_chart(
        path,
        "Humidity Levels by City",
        "%",
        &labels,
        &values,
        |_| RGBColor(135, 206, 235),
    )
}

/// Temperature against humidity, one point per city.
fn scatter_chart(
    dataset: &Dataset,
    correlation: Option<f64>,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let temperatures = dataset.temperatures();
    let humidities = dataset.humidities();

    let (x_min, x_max) = padded_range(&temperatures, false);
    let (y_min, y_max) = padded_range(&humidities, false);

    let caption = match correlation {
        Some(r) => format!("Temperature vs Humidity (r = {r:.2})"),
        None => "Temperature vs Humidity (r = N/A)".to_string(),
    };

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 36))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Temperature (°C)")
        .y_desc("Humidity (%)")
        .draw()?;

    chart.draw_series(dataset.records().iter().map(|r| {
        Circle::new(
            (r.temperature_c, r.humidity),
            8,
            temp_color(r.temperature_c).mix(0.7).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Record count per condition category.
fn conditions_chart(dataset: &Dataset, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut counts: Vec<(String, f64)> = Vec::new();
    for record in dataset.records() {
        match counts.iter_mut().find(|(c, _)| *c == record.condition) {
            Some((_, n)) => *n += 1.0,
            None => counts.push((record.condition.clone(), 1.0)),
        }
    }
    counts.sort_by(|a, b| b.1.total_cmp(&a.1));

    let values: Vec<f64> = counts.iter().map(|(_, n)| *n).collect();
    let labels: Vec<String> = counts.into_iter().map(|(c, _)| c).collect();

    bar_chart(
        path,
        "Weather Conditions Distribution",
        "cities",
        &labels,
        &values,
        |_| RGBColor(52, 152, 219),
    )
}

fn segment_label(seg: &SegmentValue<i32>, labels: &[String]) -> String {
    match seg {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

fn bar_chart(
    path: &Path,
    caption: &str,
    y_desc: &str,
    labels: &[String],
    values: &[f64],
    color_for: impl Fn(f64) -> RGBColor,
) -> Result<(), Box<dyn Error>> {
    let n = labels.len() as i32;
    let (y_min, y_max) = padded_range(values, true);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 36))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|seg| segment_label(seg, labels))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, v)| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i as i32), 0.0),
                (SegmentValue::Exact(i as i32 + 1), *v),
            ],
            color_for(*v).filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    root.present()?;
    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dataset::{Dataset, WeatherRecord},
        stats,
    };
    use chrono::Local;
    use tempfile::TempDir;

    fn dataset_fixture(rows: &[(&str, f64, f64, &str)]) -> Dataset {
        let outcomes = rows
            .iter()
            .map(|(location, temperature_c, humidity, condition)| {
                Ok(WeatherRecord {
                    location: location.to_string(),
                    temperature_c: *temperature_c,
                    humidity: *humidity,
                    condition: condition.to_string(),
                    observed_at: Local::now(),
                })
            })
            .collect();

        Dataset::from_outcomes(outcomes).0
    }

    #[test]
    fn should_refuse_to_render_empty_dataset() {
        let tmp_dir = TempDir::new().unwrap();
        let empty = dataset_fixture(&[]);
        let nonempty = dataset_fixture(&[("London", 14.0, 82.0, "Rain")]);
        let stats = stats::analyze(&nonempty).unwrap();

        let result = render_all(&empty, &stats, tmp_dir.path(), "stamp");

        assert!(matches!(result, Err(RenderError::EmptyDataset)));
        assert!(!tmp_dir.path().join("charts").exists());
    }

    #[test]
    fn should_band_bar_colors_by_temperature() {
        assert_eq!(temp_color(35.0), RGBColor(255, 68, 68));
        assert_eq!(temp_color(25.0), RGBColor(255, 140, 0));
        assert_eq!(temp_color(15.0), RGBColor(78, 205, 196));
        assert_eq!(temp_color(-3.0), RGBColor(52, 152, 219));
    }

    #[test]
    fn should_pad_degenerate_ranges() {
        let (min, max) = padded_range(&[10.0], false);

        assert!(min < 10.0);
        assert!(max > 10.0);
    }

    #[test]
    fn should_keep_zero_baseline_for_positive_bars() {
        let (min, max) = padded_range(&[14.0, 41.0], true);

        assert_eq!(min, 0.0);
        assert!(max > 41.0);
    }

    #[test]
    fn should_extend_baseline_below_zero_for_negative_bars() {
        let (min, _) = padded_range(&[-5.0, 14.0], true);

        assert!(min < -5.0);
    }

    #[test]
    fn should_label_segment_centers_with_city_names() {
        let labels = vec!["London".to_string(), "Tokyo".to_string()];

        assert_eq!(segment_label(&SegmentValue::CenterOf(1), &labels), "Tokyo");
        assert_eq!(segment_label(&SegmentValue::CenterOf(9), &labels), "");
        assert_eq!(segment_label(&SegmentValue::Exact(0), &labels), "");
    }
}
