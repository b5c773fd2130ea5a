//! Summary command - seed the stations and report coverage

use crate::session;
use anyhow::Result;
use owo_colors::OwoColorize;
use responder_cli::output::{print_summary, Status};
use responder_core::config::Config;
use responder_dashboard::DashboardOptions;
use responder_geo::{CoverageSummary, Station};
use serde::Serialize;

/// JSON output for summary
#[derive(Debug, Serialize)]
struct JsonSummaryOutput<'a> {
    summary: CoverageSummary,
    stations: &'a [Station],
    overlaps: usize,
}

/// Run summary command
pub fn run(config: &Config, format: &str) -> Result<()> {
    let session = session::build(config, DashboardOptions::default())?;
    let model = session.model();

    if format == "json" {
        let output = JsonSummaryOutput {
            summary: session.summary(),
            stations: model.stations(),
            overlaps: model.overlaps().len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_summary(&session.summary());

    Status::header("Stations");
    for station in model.stations() {
        println!(
            "  {:<40} {}",
            station.name,
            format!("({:.4}, {:.4})", station.coordinate.latitude, station.coordinate.longitude).dimmed()
        );
    }
    println!();
    Status::info(&format!("{} overlap regions", model.overlaps().len()));

    Ok(())
}
