//! Place command - add a user station at a coordinate

use super::{geo_error, print_notifications};
use crate::session;
use anyhow::Result;
use responder_cli::output::print_summary;
use responder_core::config::Config;
use responder_dashboard::DashboardOptions;
use responder_geo::{Coordinate, CoverageSummary, StationCategory, StationPlacement};
use serde::Serialize;

/// JSON output for place
#[derive(Debug, Serialize)]
struct JsonPlaceOutput {
    name: String,
    placement: StationPlacement,
    summary: CoverageSummary,
}

/// Run place command
pub fn run(
    config: &Config,
    latitude: f64,
    longitude: f64,
    name: Option<String>,
    format: &str,
) -> Result<()> {
    let at = Coordinate::new(latitude, longitude);
    if !at.is_valid() {
        return Err(responder_core::Error::invalid_coordinate(latitude, longitude).into());
    }

    let mut session = session::build(config, DashboardOptions::default())?;
    session.take_notifications();

    let name = name.unwrap_or_else(|| format!("User Station at ({latitude:.3}, {longitude:.3})"));
    let placement = session
        .add_station_with_buffers(at, name.clone(), StationCategory::UserPlaced)
        .map_err(geo_error)?;

    if format == "json" {
        let output = JsonPlaceOutput {
            name,
            placement,
            summary: session.summary(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_notifications(&session.take_notifications());
    print_summary(&session.summary());

    Ok(())
}
