//! CSV export of readings and logging of analysis results.

use chrono::{Local, NaiveDateTime, SecondsFormat};
use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::types::{AnalysisReport, HourlySummary};
use crate::error::{AirQualityError, Result};
use crate::parser::EXPORT_HEADER;
use crate::reading::Reading;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &AnalysisReport) {
    debug!("{:#?}", report);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &AnalysisReport) -> anyhow::Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Logs one human-readable line per hour bucket.
pub fn log_hourly(hours: &[HourlySummary]) {
    for h in hours {
        info!(
            "{} {:02}:00 pm25={:.2} co2={:.2} dominant={} ({} readings, {})",
            h.first_seen.format("%Y-%m-%d"),
            h.hour,
            h.averages.pm25,
            h.averages.co2,
            h.dominant,
            h.count,
            h.pm25_category
        );
    }
}

/// File name for an export taken at `now`, e.g. `air_quality_20240301_081500.csv`.
pub fn export_file_name(now: NaiveDateTime) -> String {
    format!("air_quality_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Writes the export header and one row per reading to `writer`.
pub fn write_readings<W: Write>(writer: W, readings: &[Reading]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(EXPORT_HEADER)
        .map_err(csv_error("writing CSV header"))?;
    for reading in readings {
        wtr.write_record([
            reading.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            format!("{:.2}", reading.pm25),
            format!("{:.2}", reading.co2),
        ])
        .map_err(csv_error("writing record to CSV"))?;
    }
    wtr.flush()
        .map_err(|e| AirQualityError::io("flushing CSV", e))?;

    Ok(())
}

/// Saves `readings` to `<dir>/air_quality_<YYYYMMDD_HHMMSS>.csv`.
///
/// Creates `dir` if it does not exist. An export taken within the same
/// second as an earlier one overwrites it.
pub fn save_to_csv(readings: &[Reading], dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| {
        AirQualityError::io(format!("failed to create folder {}", dir.display()), e)
    })?;

    let path = dir.join(export_file_name(Local::now().naive_local()));
    debug!(
        path = %path.display(),
        rows = readings.len(),
        "Writing CSV export"
    );

    let file = File::create(&path).map_err(|e| {
        AirQualityError::io(format!("failed to create CSV file {}", path.display()), e)
    })?;
    write_readings(file, readings)?;

    info!(path = %path.display(), "CSV file saved");
    Ok(path)
}

fn csv_error(context: &'static str) -> impl Fn(csv::Error) -> AirQualityError {
    move |e| {
        let message = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io) => AirQualityError::io(context, io),
            _ => AirQualityError::io(context, std::io::Error::other(message)),
        }
    }
}
