//! Planar coverage analysis for emergency-response stations.
//!
//! This crate provides:
//! - A planar geometry provider (buffers, intersections, point-in-polygon)
//! - The coverage model: stations, their buffers, and pairwise overlaps
//! - A greedy single-step station placement heuristic
//! - A seeded synthetic asset generator for sample sessions
//!
//! Coordinates are (longitude, latitude) in decimal degrees and are treated
//! as planar. Buffer radii are converted to degrees with a mean Earth radius
//! and a cosine-of-latitude stretch on the longitude axis; nothing else is
//! geodesic. Stations more than [`MAX_BUFFER_LATITUDE`] degrees from the
//! equator are rejected.
//!
//! # Example
//!
//! ```
//! use responder_geo::{Asset, BufferRadii, Coordinate, CoverageModel, StationCategory};
//!
//! let assets = vec![
//!     Asset::new(0, "Asset 1", Coordinate::new(21.15, 79.09)),
//!     Asset::new(1, "Asset 2", Coordinate::new(22.50, 78.50)),
//! ];
//! let mut model = CoverageModel::planar(BufferRadii::default(), assets);
//!
//! model
//!     .add_station(Coordinate::new(21.1466, 79.0888), "Nagpur", StationCategory::Seed)
//!     .unwrap();
//!
//! let summary = model.coverage_summary();
//! assert_eq!(summary.total, 2);
//! assert_eq!(summary.covered, 1);
//! ```

mod assets;
mod coverage;
mod error;
mod haversine;
mod placement;
mod planar;

pub use assets::{generate_assets, Asset, AssetId, GeneratorWindow};
pub use coverage::{
    Buffer, BufferId, BufferRadii, BufferRing, CoverageModel, CoverageSummary, OverlapRegion,
    Station, StationCategory, StationId, StationPlacement,
};
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{haversine_distance, EARTH_RADIUS_KM, KM_PER_DEGREE};
pub use placement::{find_best_site, Candidate, PlacementOutcome, SiteSearch};
pub use planar::{
    GeometryProvider, Located, PlanarGeometry, Units, DEFAULT_SEGMENTS, MAX_BUFFER_LATITUDE,
};

/// Re-exported geometry types used in the public API.
pub use geo::{MultiPolygon, Polygon};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate has finite, in-range values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }

    /// Planar position: x is longitude, y is latitude.
    #[inline]
    pub fn to_coord(self) -> geo::Coord<f64> {
        geo::coord! { x: self.longitude, y: self.latitude }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(coord: geo::Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(21.1466, 79.0888);
        assert_eq!(coord.latitude, 21.1466);
        assert_eq!(coord.longitude, 79.0888);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_coordinate_planar_axes() {
        let coord = Coordinate::new(21.1466, 79.0888);
        let planar = coord.to_coord();
        assert_eq!(planar.x, 79.0888);
        assert_eq!(planar.y, 21.1466);
        assert_eq!(Coordinate::from(planar), coord);
    }
}
