//! CLI entry point for the air-quality rater.
//!
//! Reads a batch of sensor readings from a JSON or CSV file, logs overall
//! and hourly pollutant statistics, and exports the readings to a
//! timestamped CSV file.

use air_quality_rater::analyzers::aggregate::dominant_by_date_hour;
use air_quality_rater::analyzers::analyzer::analyze;
use air_quality_rater::config::Settings;
use air_quality_rater::output::{log_hourly, print_json, print_pretty, save_to_csv};
use air_quality_rater::parser::{InputFormat, parse_readings};
use air_quality_rater::reading::Reading;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "air_quality_rater")]
#[command(about = "Aggregate PM2.5 and CO2 sensor readings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute averages and dominant pollutant per hour, then export to CSV
    Analyze {
        /// JSON or CSV file with readings (optionally gzip-compressed)
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Input format; inferred from the extension or content when auto
        #[arg(short, long, value_enum, default_value_t = FormatArg::Auto)]
        format: FormatArg,

        /// Directory to write the CSV export to [env: AIR_QUALITY_OUTPUT_DIR]
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Log the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Skip writing the CSV export
        #[arg(long, default_value_t = false)]
        no_export: bool,

        /// Also classify by calendar date and hour
        #[arg(long, default_value_t = false)]
        by_date: bool,
    },
    /// Write readings to a timestamped CSV file without aggregating
    Export {
        #[arg(value_name = "FILE")]
        source: PathBuf,

        #[arg(short, long, value_enum, default_value_t = FormatArg::Auto)]
        format: FormatArg,

        /// Directory to write the CSV export to [env: AIR_QUALITY_OUTPUT_DIR]
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Auto,
    Json,
    Csv,
    Export,
}

impl FormatArg {
    fn resolve(self, path: &Path) -> Option<InputFormat> {
        match self {
            // Both CSV layouts share the extension, so only trust `.json` and sniff the rest.
            FormatArg::Auto => match InputFormat::from_path(path) {
                Some(InputFormat::Json) => Some(InputFormat::Json),
                _ => None,
            },
            FormatArg::Json => Some(InputFormat::Json),
            FormatArg::Csv => Some(InputFormat::Csv),
            FormatArg::Export => Some(InputFormat::Export),
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let settings = Settings::from_env();
    let _file_guard = init_tracing(&settings.log_file_path)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            format,
            output_dir,
            json,
            no_export,
            by_date,
        } => {
            let readings = load_readings(&source, format)?;
            let report = analyze(&readings);

            for (pollutant, average) in report.averages.as_map() {
                info!(%pollutant, average, "Overall average");
            }
            info!(
                highest = ?report.dominant_by_hour,
                "Highest pollutant by hour"
            );
            log_hourly(&report.hours);

            if by_date {
                for ((date, hour), pollutant) in dominant_by_date_hour(&readings) {
                    info!(%date, hour, %pollutant, "Highest pollutant by date");
                }
            }

            if json {
                print_json(&report)?;
            } else {
                print_pretty(&report);
            }

            if !no_export {
                let output_dir = output_dir.unwrap_or(settings.output_dir);
                export(&readings, &output_dir)?;
            }
        }
        Commands::Export {
            source,
            format,
            output_dir,
        } => {
            let readings = load_readings(&source, format)?;
            let output_dir = output_dir.unwrap_or(settings.output_dir);
            export(&readings, &output_dir)?;
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_tracing(log_file_path: &Path) -> Result<WorkerGuard> {
    let log_dir = log_file_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("air_quality_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_filter = EnvFilter::from_env("RUST_LOG")
        .add_directive("info".parse()?);
    let json_filter = EnvFilter::from_env("RUST_LOG_JSON")
        .add_directive("debug".parse()?);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(json_filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

/// Reads and decodes the input file. Any malformed record aborts the run.
#[tracing::instrument(skip(source), fields(source = %source.display()))]
fn load_readings(source: &Path, format: FormatArg) -> Result<Vec<Reading>> {
    let bytes = std::fs::read(source)
        .with_context(|| format!("failed to read input file {}", source.display()))?;
    let readings = parse_readings(&bytes, format.resolve(source))
        .with_context(|| format!("failed to parse readings from {}", source.display()))?;

    info!(count = readings.len(), "Readings loaded");
    Ok(readings)
}

#[tracing::instrument(
    skip(readings, output_dir),
    fields(output_dir = %output_dir.display())
)]
fn export(readings: &[Reading], output_dir: &Path) -> Result<()> {
    save_to_csv(readings, output_dir).context("saving CSV")?;
    Ok(())
}
