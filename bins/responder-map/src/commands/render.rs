//! Render command - write the session map as GeoJSON

use super::geo_error;
use crate::session;
use anyhow::Result;
use responder_cli::output::{format_count, Status};
use responder_core::config::Config;
use responder_dashboard::DashboardOptions;
use responder_geo::PlacementOutcome;
use serde_json::json;
use std::path::Path;

/// Run render command
pub fn run(
    config: &Config,
    out: &Path,
    steps: usize,
    heatmap: bool,
    overlaps: bool,
    format: &str,
) -> Result<()> {
    let options = DashboardOptions {
        overlaps_visible: overlaps,
        heatmap_visible: heatmap,
        adding_user_station: false,
    };
    let mut session = session::build(config, options)?;

    for _ in 0..steps {
        if !matches!(
            session.suggest_new_station_location().map_err(geo_error)?,
            PlacementOutcome::Placed { .. }
        ) {
            break;
        }
    }

    let canvas = session.renderer();
    canvas.write_to(out)?;
    let layers = canvas.visible_layers().count();

    if format == "json" {
        let output = json!({
            "path": out.display().to_string(),
            "layers": layers,
            "stations": session.model().stations().len(),
            "summary": session.summary(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::success(&format!(
        "Wrote {} to {}",
        format_count(layers, "layer", "layers"),
        out.display()
    ));
    Ok(())
}
