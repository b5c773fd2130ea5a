//! responder-map - emergency-station coverage sessions
//!
//! Builds a coverage session from configuration (synthetic assets plus seed
//! stations), applies placements or recorded interaction events, and prints
//! the coverage summary or writes the map as GeoJSON.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use responder_core::config::Config;
use responder_core::{exit_codes, ErrorCode};
use responder_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod session;

use commands::{isochrones, place, render, replay, suggest, summary};

/// Emergency-station coverage dashboard
#[derive(Parser)]
#[command(name = "responder-map")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to .responder.toml discovery)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    /// Print collected metrics as JSON on exit
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the stations and print the coverage summary
    Summary,

    /// Run the station suggestion heuristic
    Suggest {
        /// Number of placement steps
        #[arg(short, long, default_value = "1")]
        steps: usize,
    },

    /// Place a user station
    Place {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Station name (defaults to "User Station at (lat, lng)")
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Dispatch recorded interaction events (JSON Lines)
    Replay {
        /// Event file, one JSON event per line
        events: PathBuf,

        /// Write the resulting map as GeoJSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Write the session map as GeoJSON
    Render {
        /// Output file
        #[arg(short, long)]
        out: PathBuf,

        /// Suggestion steps to run before rendering
        #[arg(short, long, default_value = "0")]
        steps: usize,

        /// Include the uncovered-asset heatmap
        #[arg(long)]
        heatmap: bool,

        /// Hide overlap regions
        #[arg(long)]
        hide_overlaps: bool,
    },

    /// Draw the sample isochrones as GeoJSON
    Isochrones {
        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn check_format(format: &str) -> anyhow::Result<()> {
    if matches!(format, "text" | "json") {
        return Ok(());
    }
    Err(responder_core::Error::validation(format!("Unknown output format `{format}`"))
        .with_suggestion("Use --format text or --format json")
        .into())
}

/// Print a failed command and pick its exit code
fn report_failure(err: &anyhow::Error, format: &str) -> i32 {
    let core = err.downcast_ref::<responder_core::Error>();
    let code = core.map_or(exit_codes::FAILURE, responder_core::Error::exit_code);

    if format == "json" {
        let report = match core {
            Some(core) => core.to_report(),
            None => responder_core::Error::new(ErrorCode::Internal, format!("{err:#}")).to_report(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(body) => {
                eprintln!("{body}");
                return code;
            }
            Err(e) => tracing::warn!(error = %e, "Could not serialize error report"),
        }
    }

    eprintln!("{} {:#}", "Error:".red().bold(), err);
    code
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
        "info,responder_map=debug,responder_geo=debug,responder_dashboard=debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    if let Err(e) = responder_telemetry::init_with_config(TelemetryConfig::with_level(level)) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let format = cli.format.as_str();
    let result = check_format(format).and_then(|()| match cli.command {
        Commands::Summary => summary::run(&config, format),
        Commands::Suggest { steps } => suggest::run(&config, steps, format),
        Commands::Place { lat, lng, name } => place::run(&config, lat, lng, name, format),
        Commands::Replay { events, out } => replay::run(&config, &events, out.as_deref(), format),
        Commands::Render {
            out,
            steps,
            heatmap,
            hide_overlaps,
        } => render::run(&config, &out, steps, heatmap, !hide_overlaps, format),
        Commands::Isochrones { out } => isochrones::run(&config, &out, format),
    });

    if cli.metrics {
        let metrics = responder_telemetry::metrics().export_json();
        match serde_json::to_string_pretty(&metrics) {
            Ok(body) => eprintln!("{body}"),
            Err(e) => tracing::warn!(error = %e, "Could not serialize metrics"),
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_failure(&e, format) as u8),
    }
}
