//! Replay command - dispatch recorded interaction events

use super::print_notifications;
use crate::session;
use anyhow::Result;
use responder_cli::output::{format_count, print_summary, Status};
use responder_core::config::Config;
use responder_core::ResultExt;
use responder_dashboard::{DashboardOptions, Notification, UiEvent};
use responder_geo::CoverageSummary;
use serde::Serialize;
use std::path::Path;

/// JSON output for replay
#[derive(Debug, Serialize)]
struct JsonReplayOutput {
    events: usize,
    stations: usize,
    notifications: Vec<String>,
    summary: CoverageSummary,
}

/// Parses a JSON Lines event file. Blank lines are skipped.
pub(crate) fn parse_events(path: &Path, content: &str) -> responder_core::Result<Vec<UiEvent>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<UiEvent>(line)
                .map_err(responder_core::Error::from)
                .context(format!("{}:{}", path.display(), index + 1))
        })
        .collect()
}

/// Run replay command
pub fn run(config: &Config, events_path: &Path, out: Option<&Path>, format: &str) -> Result<()> {
    let content = std::fs::read_to_string(events_path)
        .map_err(responder_core::Error::from)
        .context(events_path.display().to_string())?;
    let events = parse_events(events_path, &content)?;

    let mut session = session::build(config, DashboardOptions::default())?;
    session.take_notifications();

    for event in &events {
        session.dispatch(*event);
    }
    let notifications = session.take_notifications();

    if let Some(out) = out {
        session.renderer().write_to(out)?;
    }

    if format == "json" {
        let output = JsonReplayOutput {
            events: events.len(),
            stations: session.model().stations().len(),
            notifications: notifications.iter().map(Notification::to_string).collect(),
            summary: session.summary(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::header("Replay");
    Status::info(&format!(
        "Dispatched {} from {}",
        format_count(events.len(), "event", "events"),
        events_path.display()
    ));
    print_notifications(&notifications);
    if let Some(out) = out {
        Status::success(&format!("Map written to {}", out.display()));
    }
    print_summary(&session.summary());

    Ok(())
}
