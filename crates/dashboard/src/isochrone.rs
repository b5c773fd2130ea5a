//! Static sample isochrones.
//!
//! There is no routing here: the polygons are fixed sample data drawn through
//! the rendering adapter.

use crate::render::{LayerHandle, PolygonStyle, RenderAdapter};
use geo::{polygon, MultiPolygon, Polygon};

/// Color used when the caller does not pass one.
pub const DEFAULT_ISOCHRONE_COLOR: &str = "#ff0000";

/// A station's sample reachability polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Isochrone {
    /// Station the polygon belongs to
    pub station: String,
    /// Suggested display color
    pub color: String,
    /// Free-form description
    pub description: String,
    /// Reachable area
    pub polygon: Polygon<f64>,
}

/// The two bundled sample isochrones.
pub fn sample_isochrones() -> Vec<Isochrone> {
    vec![
        Isochrone {
            station: "Station A".to_string(),
            color: "orange".to_string(),
            description: "Emergency Response Station A covering Nagpur sector".to_string(),
            polygon: polygon![
                (x: 78.9, y: 21.1),
                (x: 78.9, y: 21.3),
                (x: 79.1, y: 21.3),
                (x: 79.1, y: 21.1),
                (x: 78.9, y: 21.1),
            ],
        },
        Isochrone {
            station: "Station B".to_string(),
            color: "green".to_string(),
            description: "Emergency Response Station B covering Jabalpur sector".to_string(),
            polygon: polygon![
                (x: 80.0, y: 22.0),
                (x: 80.0, y: 22.2),
                (x: 80.2, y: 22.2),
                (x: 80.2, y: 22.0),
                (x: 80.0, y: 22.0),
            ],
        },
    ]
}

/// Draws isochrones onto a map attached with [`IsochroneManager::init`].
#[derive(Debug)]
pub struct IsochroneManager<R> {
    map: Option<R>,
}

impl<R: RenderAdapter> IsochroneManager<R> {
    /// Manager with no map attached.
    pub fn new() -> Self {
        Self { map: None }
    }

    /// Attaches the map to draw on.
    pub fn init(&mut self, map: R) {
        self.map = Some(map);
    }

    /// Draws `isochrone` and fits the view to it.
    ///
    /// Without an attached map this logs an error and returns `None`.
    pub fn add_isochrone(&mut self, isochrone: &Isochrone, color: Option<&str>) -> Option<LayerHandle> {
        let Some(map) = self.map.as_mut() else {
            tracing::error!(station = %isochrone.station, "Map instance not initialized");
            return None;
        };

        let style = PolygonStyle::new(color.unwrap_or(DEFAULT_ISOCHRONE_COLOR), 0.3).with_weight(2.0);
        let shape = MultiPolygon::new(vec![isochrone.polygon.clone()]);
        let handle = map.draw_polygon(&shape, &style);
        map.fit_to_bounds(handle);

        Some(handle)
    }

    /// The attached map.
    pub fn map(&self) -> Option<&R> {
        self.map.as_ref()
    }

    /// Detaches and returns the map.
    pub fn into_map(self) -> Option<R> {
        self.map
    }
}

impl<R: RenderAdapter> Default for IsochroneManager<R> {
    fn default() -> Self {
        Self::new()
    }
}
