//! Assets and the synthetic asset generator.

use crate::{Coordinate, Located};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Position of an asset in the model's asset list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub usize);

/// An immutable point that stations try to cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Stable identifier
    pub id: AssetId,
    /// Display name
    pub name: String,
    /// Position
    pub coordinate: Coordinate,
}

impl Asset {
    /// Creates an asset.
    pub fn new(id: usize, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: AssetId(id),
            name: name.into(),
            coordinate,
        }
    }
}

impl Located for Asset {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// Rectangle and seed used to scatter synthetic assets.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorWindow {
    /// Number of assets
    pub count: usize,
    /// RNG seed
    pub seed: u64,
    /// Southern edge in degrees
    pub lat_min: f64,
    /// Height in degrees
    pub lat_span: f64,
    /// Western edge in degrees
    pub lng_min: f64,
    /// Width in degrees
    pub lng_span: f64,
}

impl Default for GeneratorWindow {
    fn default() -> Self {
        Self {
            count: 50,
            seed: 42,
            lat_min: 20.8,
            lat_span: 2.2,
            lng_min: 77.8,
            lng_span: 2.7,
        }
    }
}

/// Scatters `window.count` assets uniformly over the window.
///
/// Coordinates are rounded to four decimal places and assets are named
/// `Asset 1`, `Asset 2`, ... in generation order. The same window always
/// yields the same assets.
pub fn generate_assets(window: &GeneratorWindow) -> Vec<Asset> {
    let mut rng = ChaCha8Rng::seed_from_u64(window.seed);

    (0..window.count)
        .map(|i| {
            let lat = round4(window.lat_min + rng.gen_range(0.0..1.0) * window.lat_span);
            let lng = round4(window.lng_min + rng.gen_range(0.0..1.0) * window.lng_span);
            Asset::new(i, format!("Asset {}", i + 1), Coordinate::new(lat, lng))
        })
        .collect()
}

#[inline]
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_count_and_names() {
        let assets = generate_assets(&GeneratorWindow::default());
        assert_eq!(assets.len(), 50);
        assert_eq!(assets[0].name, "Asset 1");
        assert_eq!(assets[49].name, "Asset 50");
        assert!(assets.iter().enumerate().all(|(i, a)| a.id == AssetId(i)));
    }

    #[test]
    fn test_assets_stay_inside_window() {
        let window = GeneratorWindow::default();
        for asset in generate_assets(&window) {
            let c = asset.coordinate;
            assert!(c.latitude >= window.lat_min && c.latitude <= window.lat_min + window.lat_span);
            assert!(c.longitude >= window.lng_min && c.longitude <= window.lng_min + window.lng_span);
        }
    }

    #[test]
    fn test_same_seed_same_assets() {
        let window = GeneratorWindow::default();
        assert_eq!(generate_assets(&window), generate_assets(&window));

        let other = GeneratorWindow { seed: 7, ..GeneratorWindow::default() };
        assert_ne!(generate_assets(&window), generate_assets(&other));
    }

    #[test]
    fn test_coordinates_rounded_to_four_places() {
        for asset in generate_assets(&GeneratorWindow::default()) {
            let scaled = asset.coordinate.latitude * 10_000.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }
}
