//! Isochrones command - draw the bundled sample isochrones

use anyhow::{Context, Result};
use responder_cli::output::{format_count, Status};
use responder_core::config::Config;
use responder_dashboard::{sample_isochrones, GeoJsonCanvas, IsochroneManager, MapView};
use responder_geo::Coordinate;
use serde_json::json;
use std::path::Path;

/// Run isochrones command
pub fn run(config: &Config, out: &Path, format: &str) -> Result<()> {
    let view = MapView {
        center: Coordinate::new(config.schema.map.center_latitude, config.schema.map.center_longitude),
        zoom: config.schema.map.zoom,
    };

    let mut manager = IsochroneManager::new();
    manager.init(GeoJsonCanvas::new(view));

    let isochrones = sample_isochrones();
    for isochrone in &isochrones {
        manager.add_isochrone(isochrone, Some(isochrone.color.as_str()));
    }

    let canvas = manager.into_map().context("Isochrone map was not attached")?;
    canvas.write_to(out)?;

    if format == "json" {
        let stations: Vec<_> = isochrones.iter().map(|i| i.station.as_str()).collect();
        let output = json!({
            "path": out.display().to_string(),
            "stations": stations,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for isochrone in &isochrones {
        Status::info(&format!("{}: {}", isochrone.station, isochrone.description));
    }
    Status::success(&format!(
        "Wrote {} to {}",
        format_count(isochrones.len(), "isochrone", "isochrones"),
        out.display()
    ));
    Ok(())
}
