//! Haversine distance calculation.
//!
//! The coverage model itself is planar; great-circle distance is used to
//! size buffers in degrees and to check how far the planar approximation
//! drifts from the sphere.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Length of one degree of latitude on the mean sphere, in kilometers.
pub const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use responder_geo::{haversine_distance, Coordinate};
///
/// let nagpur = Coordinate::new(21.1466, 79.0888);
/// let indore = Coordinate::new(22.7179, 75.8577);
///
/// let distance = haversine_distance(&nagpur, &indore);
/// assert!((distance - 377.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
