//! Coverage model: stations, buffers, and overlap regions.
//!
//! The model only grows. Stations, buffers and overlaps are appended and
//! never removed, and coverage is recomputed from the full buffer set on
//! every query.

use crate::{Asset, Coordinate, GeoError, GeometryProvider, PlanarGeometry, Result, Units};
use geo::{MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Index of a station in placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(pub usize);

/// Index of a buffer in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BufferId(pub usize);

/// How a station came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationCategory {
    /// Placed by the greedy heuristic
    Suggested,
    /// Placed by a map click
    UserPlaced,
    /// Placed at startup
    Seed,
}

/// A placed station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Placement order
    pub id: StationId,
    /// Display name
    pub name: String,
    /// Position
    pub coordinate: Coordinate,
    /// Origin tag
    pub category: StationCategory,
}

/// Which of a station's two buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferRing {
    /// Smaller radius
    Inner,
    /// Larger radius
    Outer,
}

/// Fixed radii applied to every station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferRadii {
    /// Inner radius in kilometers
    pub inner_km: f64,
    /// Outer radius in kilometers
    pub outer_km: f64,
}

impl BufferRadii {
    /// Radius of the given ring in kilometers.
    pub fn radius_km(&self, ring: BufferRing) -> f64 {
        match ring {
            BufferRing::Inner => self.inner_km,
            BufferRing::Outer => self.outer_km,
        }
    }
}

impl Default for BufferRadii {
    fn default() -> Self {
        Self {
            inner_km: 5.0,
            outer_km: 10.0,
        }
    }
}

/// A station's coverage polygon at one radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    /// Creation order
    pub id: BufferId,
    /// Owning station
    pub station: StationId,
    /// Which radius
    pub ring: BufferRing,
    /// Radius in kilometers
    pub radius_km: f64,
    /// Planar polygon
    pub polygon: Polygon<f64>,
}

/// Intersection of a newly added buffer with an older one. Display only.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapRegion {
    /// The buffer whose insertion produced this overlap
    pub added: BufferId,
    /// The buffer it was intersected with
    pub existing: BufferId,
    /// Ring of the added buffer
    pub ring: BufferRing,
    /// Shared area
    pub region: MultiPolygon<f64>,
}

/// What an `add_station` call produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationPlacement {
    /// The new station
    pub station: StationId,
    /// Inner and outer buffer ids
    pub buffers: [BufferId; 2],
    /// Assets inside the inner buffer
    pub within_inner: usize,
    /// Assets inside the outer buffer
    pub within_outer: usize,
    /// Indices into [`CoverageModel::overlaps`] added by this call
    pub overlaps: Range<usize>,
}

/// Aggregate coverage counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Number of assets
    pub total: usize,
    /// Assets inside at least one buffer
    pub covered: usize,
    /// Assets inside no buffer
    pub uncovered: usize,
}

/// Stations, buffers and overlaps over a fixed asset set.
#[derive(Debug, Clone)]
pub struct CoverageModel<G = PlanarGeometry> {
    geometry: G,
    radii: BufferRadii,
    assets: Vec<Asset>,
    stations: Vec<Station>,
    buffers: Vec<Buffer>,
    overlaps: Vec<OverlapRegion>,
}

impl CoverageModel<PlanarGeometry> {
    /// Model backed by the default planar geometry.
    pub fn planar(radii: BufferRadii, assets: Vec<Asset>) -> Self {
        Self::new(PlanarGeometry::default(), radii, assets)
    }
}

impl<G: GeometryProvider> CoverageModel<G> {
    /// Creates an empty model over `assets`.
    pub fn new(geometry: G, radii: BufferRadii, assets: Vec<Asset>) -> Self {
        Self {
            geometry,
            radii,
            assets,
            stations: Vec::new(),
            buffers: Vec::new(),
            overlaps: Vec::new(),
        }
    }

    /// Places a station and derives its inner and outer buffers.
    ///
    /// Each new buffer is intersected with every buffer that existed before
    /// this call, inner first, then outer; the two new buffers are not
    /// intersected with each other. On error the model is unchanged.
    pub fn add_station(
        &mut self,
        coordinate: Coordinate,
        name: impl Into<String>,
        category: StationCategory,
    ) -> Result<StationPlacement> {
        if !coordinate.is_valid() {
            return Err(GeoError::InvalidCoordinate(format!(
                "({}, {})",
                coordinate.latitude, coordinate.longitude
            )));
        }

        let inner = self.build_buffer(&coordinate, BufferRing::Inner)?;
        let outer = self.build_buffer(&coordinate, BufferRing::Outer)?;

        let station_id = StationId(self.stations.len());
        let inner_id = BufferId(self.buffers.len());
        let outer_id = BufferId(self.buffers.len() + 1);

        let first_overlap = self.overlaps.len();
        for (added, ring, polygon) in [
            (inner_id, BufferRing::Inner, &inner),
            (outer_id, BufferRing::Outer, &outer),
        ] {
            for existing in &self.buffers {
                if let Some(region) = self.geometry.intersect(polygon, &existing.polygon) {
                    self.overlaps.push(OverlapRegion {
                        added,
                        existing: existing.id,
                        ring,
                        region,
                    });
                }
            }
        }

        let within_inner = self.geometry.points_within_polygon(&self.assets, &inner).len();
        let within_outer = self.geometry.points_within_polygon(&self.assets, &outer).len();

        let name = name.into();
        tracing::debug!(
            station = %name,
            ?category,
            within_inner,
            within_outer,
            overlaps = self.overlaps.len() - first_overlap,
            "Station added"
        );

        self.stations.push(Station {
            id: station_id,
            name,
            coordinate,
            category,
        });
        self.buffers.push(Buffer {
            id: inner_id,
            station: station_id,
            ring: BufferRing::Inner,
            radius_km: self.radii.inner_km,
            polygon: inner,
        });
        self.buffers.push(Buffer {
            id: outer_id,
            station: station_id,
            ring: BufferRing::Outer,
            radius_km: self.radii.outer_km,
            polygon: outer,
        });

        Ok(StationPlacement {
            station: station_id,
            buffers: [inner_id, outer_id],
            within_inner,
            within_outer,
            overlaps: first_overlap..self.overlaps.len(),
        })
    }

    /// True iff `point` lies inside at least one buffer.
    pub fn is_covered(&self, point: &Coordinate) -> bool {
        self.buffers
            .iter()
            .any(|buffer| self.geometry.point_in_polygon(point, &buffer.polygon))
    }

    /// Counts covered and uncovered assets from scratch.
    pub fn coverage_summary(&self) -> CoverageSummary {
        let total = self.assets.len();
        let covered = self
            .assets
            .iter()
            .filter(|asset| self.is_covered(&asset.coordinate))
            .count();

        CoverageSummary {
            total,
            covered,
            uncovered: total - covered,
        }
    }

    /// Assets currently outside every buffer, in asset order.
    pub fn uncovered_assets(&self) -> impl Iterator<Item = &Asset> + '_ {
        self.assets
            .iter()
            .filter(move |asset| !self.is_covered(&asset.coordinate))
    }

    /// Builds a buffer polygon at one of the configured radii.
    pub(crate) fn build_buffer(&self, center: &Coordinate, ring: BufferRing) -> Result<Polygon<f64>> {
        self.geometry
            .buffer(center, self.radii.radius_km(ring), Units::Kilometers)
    }

    /// All assets.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Stations in placement order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Looks up a station.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.0)
    }

    /// Buffers in creation order.
    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    /// Looks up a buffer.
    pub fn buffer(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(id.0)
    }

    /// Overlap regions in creation order.
    pub fn overlaps(&self) -> &[OverlapRegion] {
        &self.overlaps
    }

    /// Configured radii.
    pub fn radii(&self) -> BufferRadii {
        self.radii
    }

    /// Geometry provider in use.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_assets, GeneratorWindow};
    use proptest::prelude::*;

    const NAGPUR: Coordinate = Coordinate { latitude: 21.1466, longitude: 79.0888 };
    const INDORE: Coordinate = Coordinate { latitude: 22.7179, longitude: 75.8577 };

    fn sample_model() -> CoverageModel {
        CoverageModel::planar(BufferRadii::default(), generate_assets(&GeneratorWindow::default()))
    }

    fn asset_at(id: usize, lat: f64, lng: f64) -> Asset {
        Asset::new(id, format!("Asset {}", id + 1), Coordinate::new(lat, lng))
    }

    #[test]
    fn test_empty_model_covers_nothing() {
        let model = sample_model();
        let summary = model.coverage_summary();
        assert_eq!(summary, CoverageSummary { total: 50, covered: 0, uncovered: 50 });
        assert!(!model.is_covered(&NAGPUR));
    }

    #[test]
    fn test_add_station_creates_two_buffers() {
        let mut model = sample_model();
        let placement = model.add_station(NAGPUR, "Nagpur", StationCategory::Seed).unwrap();

        assert_eq!(placement.station, StationId(0));
        assert_eq!(placement.buffers, [BufferId(0), BufferId(1)]);
        assert_eq!(model.buffers()[0].ring, BufferRing::Inner);
        assert_eq!(model.buffers()[0].radius_km, 5.0);
        assert_eq!(model.buffers()[1].ring, BufferRing::Outer);
        assert_eq!(model.buffers()[1].radius_km, 10.0);
        assert!(placement.overlaps.is_empty());
        assert!(model.is_covered(&NAGPUR));
    }

    #[test]
    fn test_seed_stations_scenario() {
        let mut model = sample_model();
        model.add_station(NAGPUR, "Nagpur Fire Station", StationCategory::Seed).unwrap();
        model.add_station(INDORE, "Indore Ambulance HQ", StationCategory::Seed).unwrap();

        let summary = model.coverage_summary();
        assert_eq!(summary.total, 50);
        assert_eq!(summary.covered + summary.uncovered, 50);
        // The stations are ~380 km apart; their buffers cannot meet.
        assert!(model.overlaps().is_empty());
    }

    #[test]
    fn test_overlaps_against_existing_buffers_only() {
        let mut model = CoverageModel::planar(BufferRadii::default(), vec![]);
        model.add_station(NAGPUR, "A", StationCategory::Seed).unwrap();
        // ~3 km east: every pair of buffers between the two stations overlaps
        let placement = model
            .add_station(Coordinate::new(21.1466, 79.1178), "B", StationCategory::UserPlaced)
            .unwrap();

        assert_eq!(placement.overlaps, 0..4);
        let pairs: Vec<_> = model
            .overlaps()
            .iter()
            .map(|o| (o.added, o.existing, o.ring))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (BufferId(2), BufferId(0), BufferRing::Inner),
                (BufferId(2), BufferId(1), BufferRing::Inner),
                (BufferId(3), BufferId(0), BufferRing::Outer),
                (BufferId(3), BufferId(1), BufferRing::Outer),
            ]
        );
    }

    #[test]
    fn test_within_counts() {
        let assets = vec![
            asset_at(0, 21.1466, 79.0888),
            // ~7.5 km north: outside inner, inside outer
            asset_at(1, 21.2140, 79.0888),
            asset_at(2, 23.0, 80.0),
        ];
        let mut model = CoverageModel::planar(BufferRadii::default(), assets);
        let placement = model.add_station(NAGPUR, "Nagpur", StationCategory::Seed).unwrap();

        assert_eq!(placement.within_inner, 1);
        assert_eq!(placement.within_outer, 2);
        assert_eq!(model.coverage_summary().covered, 2);
        let uncovered: Vec<_> = model.uncovered_assets().map(|a| a.id.0).collect();
        assert_eq!(uncovered, vec![2]);
    }

    #[test]
    fn test_invalid_station_leaves_model_unchanged() {
        let mut model = sample_model();
        let err = model
            .add_station(Coordinate::new(f64::NAN, 79.0), "Broken", StationCategory::UserPlaced)
            .unwrap_err();

        assert!(matches!(err, GeoError::InvalidCoordinate(_)));
        assert!(model.stations().is_empty());
        assert!(model.buffers().is_empty());
    }

    #[test]
    fn test_polar_station_is_rejected() {
        let mut model = sample_model();
        model.add_station(NAGPUR, "Nagpur", StationCategory::Seed).unwrap();

        let err = model
            .add_station(Coordinate::new(90.0, 0.0), "North Pole", StationCategory::UserPlaced)
            .unwrap_err();

        assert!(matches!(err, GeoError::InvalidCoordinate(_)));
        assert_eq!(model.stations().len(), 1);
        assert_eq!(model.buffers().len(), 2);
        assert!(model.overlaps().is_empty());
    }

    #[test]
    fn test_is_covered_idempotent() {
        let mut model = sample_model();
        model.add_station(NAGPUR, "Nagpur", StationCategory::Seed).unwrap();

        for asset in model.assets() {
            assert_eq!(model.is_covered(&asset.coordinate), model.is_covered(&asset.coordinate));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_summary_partitions_total(
            stations in prop::collection::vec((20.8..23.0_f64, 77.8..80.5_f64), 0..5),
            seed in 0u64..1000,
        ) {
            let window = GeneratorWindow { seed, ..GeneratorWindow::default() };
            let mut model = CoverageModel::planar(BufferRadii::default(), generate_assets(&window));

            for (lat, lng) in stations {
                model.add_station(Coordinate::new(lat, lng), "S", StationCategory::UserPlaced).unwrap();
                let summary = model.coverage_summary();
                prop_assert_eq!(summary.covered + summary.uncovered, summary.total);
            }
        }

        #[test]
        fn prop_covered_count_is_monotone(
            stations in prop::collection::vec((20.8..23.0_f64, 77.8..80.5_f64), 1..6),
        ) {
            let mut model = CoverageModel::planar(
                BufferRadii::default(),
                generate_assets(&GeneratorWindow::default()),
            );
            let mut previous = model.coverage_summary().covered;

            for (lat, lng) in stations {
                model.add_station(Coordinate::new(lat, lng), "S", StationCategory::UserPlaced).unwrap();
                let covered = model.coverage_summary().covered;
                prop_assert!(covered >= previous);
                previous = covered;
            }
        }
    }
}
