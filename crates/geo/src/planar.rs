//! Planar geometry provider.
//!
//! Supplies the four primitives the coverage model needs: buffer, intersect,
//! point-in-polygon and points-within-polygon. Points on a polygon boundary
//! count as inside, and every coverage decision in the crate goes through
//! [`GeometryProvider::point_in_polygon`], so the convention is applied
//! uniformly.
//!
//! Buffers are drawn in degree space with the longitude radius scaled by
//! `1 / cos(latitude)`. That factor diverges at the poles, so
//! [`PlanarGeometry`] refuses buffer centers beyond
//! [`MAX_BUFFER_LATITUDE`].

use crate::{Coordinate, GeoError, Result, KM_PER_DEGREE};
use geo::{Area, BooleanOps, Intersects, LineString, MultiPolygon, Polygon};
use std::f64::consts::PI;

/// Default number of segments used to approximate a buffer circle.
pub const DEFAULT_SEGMENTS: usize = 64;

/// Largest absolute latitude a planar buffer may be centered on.
pub const MAX_BUFFER_LATITUDE: f64 = 89.0;

/// Distance units accepted by [`GeometryProvider::buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    /// Kilometers
    Kilometers,
    /// Meters
    Meters,
    /// International miles
    Miles,
    /// Degrees of latitude
    Degrees,
}

impl Units {
    /// Converts a distance in these units to degrees of latitude.
    #[inline]
    pub fn to_degrees(self, value: f64) -> f64 {
        match self {
            Units::Kilometers => value / KM_PER_DEGREE,
            Units::Meters => value / 1000.0 / KM_PER_DEGREE,
            Units::Miles => value * 1.609_344 / KM_PER_DEGREE,
            Units::Degrees => value,
        }
    }
}

/// Anything with a position that can be tested against a polygon.
pub trait Located {
    /// Position of the item.
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

/// Geometry primitives consumed by the coverage model.
pub trait GeometryProvider: Send + Sync {
    /// Builds a closed polygon approximating a circle of `radius` around `center`.
    fn buffer(&self, center: &Coordinate, radius: f64, units: Units) -> Result<Polygon<f64>>;

    /// Intersection of two polygons, or `None` when they share no area.
    fn intersect(&self, a: &Polygon<f64>, b: &Polygon<f64>) -> Option<MultiPolygon<f64>>;

    /// True when `point` lies inside or on the boundary of `polygon`.
    fn point_in_polygon(&self, point: &Coordinate, polygon: &Polygon<f64>) -> bool;

    /// The subset of `points` inside `polygon`, in input order.
    fn points_within_polygon<'a, P: Located>(
        &self,
        points: &'a [P],
        polygon: &Polygon<f64>,
    ) -> Vec<&'a P>
    where
        Self: Sized,
    {
        points
            .iter()
            .filter(|p| self.point_in_polygon(&p.coordinate(), polygon))
            .collect()
    }
}

/// Planar implementation backed by the `geo` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanarGeometry {
    segments: usize,
}

impl PlanarGeometry {
    /// Creates a provider that approximates circles with `segments` edges.
    ///
    /// Values below 4 are raised to 4.
    pub fn new(segments: usize) -> Self {
        Self { segments: segments.max(4) }
    }

    /// Number of edges per buffer circle.
    pub fn segments(&self) -> usize {
        self.segments
    }
}

impl Default for PlanarGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENTS)
    }
}

impl GeometryProvider for PlanarGeometry {
    fn buffer(&self, center: &Coordinate, radius: f64, units: Units) -> Result<Polygon<f64>> {
        if !center.is_valid() {
            return Err(GeoError::InvalidCoordinate(format!(
                "({}, {})",
                center.latitude, center.longitude
            )));
        }
        if center.latitude.abs() > MAX_BUFFER_LATITUDE {
            return Err(GeoError::InvalidCoordinate(format!(
                "({}, {}) is too close to a pole for a planar buffer",
                center.latitude, center.longitude
            )));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeoError::InvalidRadius(format!("{radius} {units:?}")));
        }

        let d_lat = units.to_degrees(radius);
        // Stretch longitude so the circle is round on the ground, not on the grid
        let d_lng = d_lat / center.latitude.to_radians().cos();

        let n = self.segments;
        let mut ring = Vec::with_capacity(n + 1);
        for i in 0..n {
            let angle = 2.0 * PI * i as f64 / n as f64;
            ring.push((
                center.longitude + d_lng * angle.cos(),
                center.latitude + d_lat * angle.sin(),
            ));
        }
        ring.push(ring[0]);

        Ok(Polygon::new(LineString::from(ring), vec![]))
    }

    fn intersect(&self, a: &Polygon<f64>, b: &Polygon<f64>) -> Option<MultiPolygon<f64>> {
        let region = a.intersection(b);
        if region.0.is_empty() || region.unsigned_area() <= 0.0 {
            None
        } else {
            Some(region)
        }
    }

    fn point_in_polygon(&self, point: &Coordinate, polygon: &Polygon<f64>) -> bool {
        polygon.intersects(&point.to_coord())
    }
}
