//! Suggest command - greedy station placement

use super::{geo_error, print_notifications};
use crate::session;
use anyhow::Result;
use responder_cli::output::{format_count, print_summary, Status};
use responder_core::config::Config;
use responder_dashboard::DashboardOptions;
use responder_geo::{CoverageSummary, PlacementOutcome, Station};
use serde::Serialize;

/// JSON output for suggest
#[derive(Debug, Serialize)]
struct JsonSuggestOutput {
    placed: Vec<PlacedStation>,
    stopped: Option<&'static str>,
    summary: CoverageSummary,
}

#[derive(Debug, Serialize)]
struct PlacedStation {
    station: Station,
    score: usize,
    within_inner: usize,
    within_outer: usize,
}

/// Run suggest command
pub fn run(config: &Config, steps: usize, format: &str) -> Result<()> {
    let mut session = session::build(config, DashboardOptions::default())?;
    session.take_notifications();

    let mut placed = Vec::new();
    let mut stopped = None;

    for step in 1..=steps {
        match session.suggest_new_station_location().map_err(geo_error)? {
            PlacementOutcome::Placed {
                candidate,
                placement,
            } => {
                tracing::debug!(step, score = candidate.score, "Suggestion placed");
                if let Some(station) = session.model().station(placement.station) {
                    placed.push(PlacedStation {
                        station: station.clone(),
                        score: candidate.score,
                        within_inner: placement.within_inner,
                        within_outer: placement.within_outer,
                    });
                }
            }
            PlacementOutcome::AllCovered => {
                stopped = Some("all_covered");
                break;
            }
            PlacementOutcome::NoCandidate => {
                stopped = Some("no_candidate");
                break;
            }
        }
    }

    if format == "json" {
        let output = JsonSuggestOutput {
            placed,
            stopped,
            summary: session.summary(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::header("Station Suggestions");
    print_notifications(&session.take_notifications());
    println!();
    Status::info(&format!(
        "Placed {}",
        format_count(placed.len(), "station", "stations")
    ));
    print_summary(&session.summary());

    Ok(())
}
