//! responder-clean - normalize raw incident CSV exports
//!
//! Drops rows without usable coordinates or creation dates, keeps rows inside
//! the configured bounding box, and appends hour, weekday, month and weekend
//! columns.

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use responder_cli::output::{format_count, format_duration, Status};
use responder_cli::progress;
use responder_core::config::Config;
use responder_core::{exit_codes, ErrorCode};
use responder_incidents::{clean_file, Bounds, IncidentError};
use responder_telemetry::{metrics, TelemetryConfig, Timer};
use std::path::PathBuf;
use std::process::ExitCode;

/// Incident CSV cleaner
#[derive(Parser)]
#[command(name = "responder-clean")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raw incident CSV (defaults to cleaning.input)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Cleaned CSV, overwritten if present (defaults to cleaning.output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (defaults to .responder.toml discovery)
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Maps a cleaning failure onto the shared error codes.
fn incident_error(err: IncidentError) -> responder_core::Error {
    match err {
        IncidentError::Io { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
            responder_core::Error::file_not_found(&path).with_source(source)
        }
        IncidentError::Io { path, source } => responder_core::Error::from(source).with_context(path),
        IncidentError::Csv(source) => {
            responder_core::Error::new(ErrorCode::CsvError, format!("CSV error: {source}"))
                .with_source(source)
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let cleaning = &config.schema.cleaning;
    let input = cli.input.clone().unwrap_or_else(|| PathBuf::from(&cleaning.input));
    let output = cli.output.clone().unwrap_or_else(|| PathBuf::from(&cleaning.output));
    let bounds = Bounds {
        lat_min: cleaning.lat_min,
        lat_max: cleaning.lat_max,
        lon_min: cleaning.lon_min,
        lon_max: cleaning.lon_max,
    };

    tracing::debug!(input = %input.display(), output = %output.display(), ?bounds, "Cleaning incidents");

    let spinner = progress::spinner(&format!("Cleaning {}", input.display()));
    let timer = Timer::start("clean.run_ms");

    let report = match clean_file(&input, &output, &bounds) {
        Ok(report) => report,
        Err(e) => {
            progress::finish_error(&spinner, "Cleaning failed");
            return Err(incident_error(e).into());
        }
    };
    let elapsed = timer.stop();
    metrics().increment_by("incident_rows_written", report.rows_written as u64);

    progress::finish_success(
        &spinner,
        &format!(
            "Kept {} of {} in {}",
            format_count(report.rows_written, "row", "rows"),
            report.rows_read,
            format_duration(elapsed)
        ),
    );
    Status::success(&format!("Data cleaning complete. Output saved to {}", output.display()));

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return ExitCode::from(exit_codes::CONFIG_ERROR as u8);
        }
    };

    let level = if cli.verbose {
        "info,responder_incidents=debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    if let Err(e) = responder_telemetry::init_with_config(TelemetryConfig::with_level(level)) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            let code = e
                .downcast_ref::<responder_core::Error>()
                .map_or(exit_codes::FAILURE, responder_core::Error::exit_code);
            ExitCode::from(code as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn io_failure(kind: io::ErrorKind) -> IncidentError {
        IncidentError::Io {
            path: "data/raw.csv".to_string(),
            source: io::Error::new(kind, "cleaning failed"),
        }
    }

    #[test]
    fn test_missing_input_is_file_not_found() {
        let err = incident_error(io_failure(io::ErrorKind::NotFound));
        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert!(err.message.contains("data/raw.csv"));
        assert!(err.suggestion.is_some());
        assert_eq!(err.exit_code(), exit_codes::DATA_ERROR);
    }

    #[test]
    fn test_other_io_keeps_path_as_context() {
        let err = incident_error(io_failure(io::ErrorKind::PermissionDenied));
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(err.context.as_deref(), Some("data/raw.csv"));
    }

    #[test]
    fn test_csv_failure_is_data_error() {
        let source = csv::Error::from(io::Error::other("stream truncated"));
        let err = incident_error(IncidentError::Csv(source));
        assert_eq!(err.code, ErrorCode::CsvError);
        assert_eq!(err.code.category(), "Data");
        assert_eq!(err.exit_code(), exit_codes::DATA_ERROR);
    }
}
