//! Session construction from configuration.

use crate::commands::geo_error;
use anyhow::{Context, Result};
use responder_core::config::Config;
use responder_dashboard::{Dashboard, DashboardOptions, GeoJsonCanvas, MapView};
use responder_geo::{
    generate_assets, BufferRadii, Coordinate, CoverageModel, GeneratorWindow, PlanarGeometry,
    StationCategory,
};

/// The dashboard type every command works with.
pub type Session = Dashboard<GeoJsonCanvas>;

/// Generates the assets, draws them, and places the configured seed stations.
pub fn build(config: &Config, options: DashboardOptions) -> Result<Session> {
    let schema = &config.schema;

    let window = GeneratorWindow {
        count: schema.assets.count,
        seed: schema.assets.seed,
        lat_min: schema.assets.lat_min,
        lat_span: schema.assets.lat_span,
        lng_min: schema.assets.lng_min,
        lng_span: schema.assets.lng_span,
    };
    let radii = BufferRadii {
        inner_km: schema.coverage.inner_radius_km,
        outer_km: schema.coverage.outer_radius_km,
    };
    let model = CoverageModel::new(
        PlanarGeometry::new(schema.coverage.buffer_segments),
        radii,
        generate_assets(&window),
    );

    let view = MapView {
        center: Coordinate::new(schema.map.center_latitude, schema.map.center_longitude),
        zoom: schema.map.zoom,
    };
    let mut dashboard = Dashboard::new(model, GeoJsonCanvas::new(view), options);

    for seed in &schema.stations {
        dashboard
            .add_station_with_buffers(
                Coordinate::new(seed.latitude, seed.longitude),
                seed.name.clone(),
                StationCategory::Seed,
            )
            .map_err(geo_error)
            .with_context(|| format!("Failed to place seed station '{}'", seed.name))?;
    }

    tracing::debug!(
        assets = dashboard.model().assets().len(),
        stations = dashboard.model().stations().len(),
        "Session ready"
    );
    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session() {
        let session = build(&Config::default(), DashboardOptions::default()).unwrap();
        let summary = session.summary();

        assert_eq!(summary.total, 50);
        assert_eq!(summary.covered + summary.uncovered, 50);
        assert_eq!(session.model().stations().len(), 2);
        assert_eq!(session.model().buffers().len(), 4);
    }

    #[test]
    fn test_no_seed_stations() {
        let mut config = Config::default();
        config.schema.stations.clear();
        config.schema.assets.count = 10;

        let session = build(&config, DashboardOptions::default()).unwrap();
        assert_eq!(session.summary().uncovered, 10);
    }

    #[test]
    fn test_polar_seed_station_is_invalid_coordinate() {
        let mut config = Config::default();
        config.schema.stations[0].latitude = 90.0;

        let err = build(&config, DashboardOptions::default()).unwrap_err();
        let core = err.downcast_ref::<responder_core::Error>().unwrap();
        assert_eq!(core.code, responder_core::ErrorCode::InvalidCoordinate);
        assert!(err.to_string().starts_with("Failed to place seed station"));
    }
}
