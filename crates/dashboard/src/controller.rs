//! Dashboard controller.
//!
//! The controller is the single owner of session state. Each [`UiEvent`] is
//! handled to completion before the next one; handlers report outcomes as
//! [`Notification`]s and log failures instead of returning them.

use crate::heatmap::UncoveredHeatmap;
use crate::overlays::OverlayLayers;
use crate::render::{LayerHandle, MarkerStyle, PolygonStyle, RenderAdapter};
use geo::MultiPolygon;
use responder_geo::{
    BufferRing, Coordinate, CoverageModel, CoverageSummary, GeoError, GeometryProvider,
    PlacementOutcome, PlanarGeometry, StationCategory, StationPlacement,
};
use responder_telemetry::{metrics, Timer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interaction events the dashboard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    /// Pointer click on the map
    MapClick {
        /// Clicked latitude
        latitude: f64,
        /// Clicked longitude
        longitude: f64,
    },
    /// Overlap visibility checkbox
    ToggleOverlaps {
        /// New checkbox state
        checked: bool,
    },
    /// Heatmap visibility checkbox
    ToggleHeatmap {
        /// New checkbox state
        checked: bool,
    },
    /// Click-to-place mode checkbox
    ToggleAddUserStation {
        /// New checkbox state
        checked: bool,
    },
    /// "Suggest location" button
    SuggestLocation,
}

/// User-visible outcome of a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "notification", rename_all = "snake_case")]
pub enum Notification {
    /// A station and its buffers were added
    StationAdded {
        /// Station name
        name: String,
        /// Assets within the inner buffer
        within_inner: usize,
        /// Assets within the outer buffer
        within_outer: usize,
    },
    /// The heuristic found nothing left to cover
    AllCovered,
    /// The heuristic found no candidate
    NoSuitableCluster,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::StationAdded {
                name,
                within_inner,
                within_outer,
            } => write!(
                f,
                "{name}: {within_inner} assets within the inner buffer, {within_outer} within the outer buffer"
            ),
            Notification::AllCovered => write!(f, "All assets are already covered."),
            Notification::NoSuitableCluster => write!(f, "No suitable uncovered cluster found."),
        }
    }
}

/// Initial toggle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Overlap regions shown
    pub overlaps_visible: bool,
    /// Uncovered heatmap shown
    pub heatmap_visible: bool,
    /// Map clicks place user stations
    pub adding_user_station: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            overlaps_visible: true,
            heatmap_visible: false,
            adding_user_station: false,
        }
    }
}

/// Coverage session state plus the map it draws on.
#[derive(Debug)]
pub struct Dashboard<R, G = PlanarGeometry> {
    model: CoverageModel<G>,
    renderer: R,
    overlays: OverlayLayers,
    heatmap: UncoveredHeatmap,
    uncovered_markers: Vec<LayerHandle>,
    heatmap_visible: bool,
    adding_user_station: bool,
    summary: CoverageSummary,
    notifications: Vec<Notification>,
}

impl<R: RenderAdapter, G: GeometryProvider> Dashboard<R, G> {
    /// Draws every asset and starts the session.
    pub fn new(model: CoverageModel<G>, mut renderer: R, options: DashboardOptions) -> Self {
        let asset_style = MarkerStyle::solid("blue", 5.0);
        for asset in model.assets() {
            renderer.draw_marker(asset.coordinate, &asset_style, &asset.name);
        }

        let summary = model.coverage_summary();
        let mut dashboard = Self {
            model,
            renderer,
            overlays: OverlayLayers::new(options.overlaps_visible),
            heatmap: UncoveredHeatmap::default(),
            uncovered_markers: Vec::new(),
            heatmap_visible: options.heatmap_visible,
            adding_user_station: options.adding_user_station,
            summary,
            notifications: Vec::new(),
        };
        dashboard.refresh_heatmap();
        dashboard
    }

    /// Routes an event to its handler.
    pub fn dispatch(&mut self, event: UiEvent) {
        tracing::debug!(?event, "Dispatching event");
        match event {
            UiEvent::MapClick {
                latitude,
                longitude,
            } => self.on_map_click(Coordinate::new(latitude, longitude)),
            UiEvent::ToggleOverlaps { checked } => self.on_toggle_overlaps(checked),
            UiEvent::ToggleHeatmap { checked } => self.on_toggle_heatmap(checked),
            UiEvent::ToggleAddUserStation { checked } => self.on_toggle_add_user_station(checked),
            UiEvent::SuggestLocation => self.on_suggest_location(),
        }
    }

    fn on_map_click(&mut self, at: Coordinate) {
        if !self.adding_user_station {
            return;
        }
        let name = format!("User Station at ({:.3}, {:.3})", at.latitude, at.longitude);
        if let Err(err) = self.add_station_with_buffers(at, name, StationCategory::UserPlaced) {
            tracing::error!(error = %err, "Could not place user station");
        }
    }

    fn on_toggle_overlaps(&mut self, checked: bool) {
        self.overlays.set_visible(&mut self.renderer, checked);
    }

    fn on_toggle_heatmap(&mut self, checked: bool) {
        self.heatmap_visible = checked;
        self.refresh_heatmap();
    }

    fn on_toggle_add_user_station(&mut self, checked: bool) {
        self.adding_user_station = checked;
    }

    fn on_suggest_location(&mut self) {
        if let Err(err) = self.suggest_new_station_location() {
            tracing::error!(error = %err, "Station suggestion failed");
        }
    }

    /// Runs one greedy placement step and draws the result.
    pub fn suggest_new_station_location(&mut self) -> Result<PlacementOutcome, GeoError> {
        let _timer = Timer::start("dashboard.suggest_ms");
        let outcome = self.model.suggest_new_station()?;

        match &outcome {
            PlacementOutcome::AllCovered => {
                self.notify(Notification::AllCovered);
            }
            PlacementOutcome::NoCandidate => {
                self.notify(Notification::NoSuitableCluster);
            }
            PlacementOutcome::Placed { placement, .. } => {
                metrics().increment("stations_suggested");
                self.render_placement(placement);
            }
        }

        Ok(outcome)
    }

    /// Adds a station to the model and draws it, its buffers, and any new
    /// overlaps, then refreshes the uncovered layer, summary and heatmap.
    pub fn add_station_with_buffers(
        &mut self,
        at: Coordinate,
        name: impl Into<String>,
        category: StationCategory,
    ) -> Result<StationPlacement, GeoError> {
        let _timer = Timer::start("dashboard.add_station_ms");
        let placement = self.model.add_station(at, name, category)?;
        self.render_placement(&placement);
        Ok(placement)
    }

    fn render_placement(&mut self, placement: &StationPlacement) {
        let Some(station) = self.model.station(placement.station) else {
            return;
        };

        let color = match station.category {
            StationCategory::Suggested => "darkgreen",
            StationCategory::UserPlaced => "black",
            StationCategory::Seed => "grey",
        };
        self.renderer
            .draw_marker(station.coordinate, &MarkerStyle::solid(color, 6.0), &station.name);

        for id in placement.buffers {
            let Some(buffer) = self.model.buffer(id) else {
                continue;
            };
            let style = match buffer.ring {
                BufferRing::Inner => PolygonStyle::new("green", 0.2),
                BufferRing::Outer => PolygonStyle::new("orange", 0.1),
            };
            self.renderer
                .draw_polygon(&MultiPolygon::new(vec![buffer.polygon.clone()]), &style);
        }

        for overlap in &self.model.overlaps()[placement.overlaps.clone()] {
            let style = match overlap.ring {
                BufferRing::Inner => PolygonStyle::new("purple", 0.4),
                BufferRing::Outer => PolygonStyle::new("purple", 0.3),
            };
            let handle = self.renderer.draw_polygon(&overlap.region, &style);
            self.overlays.record(&mut self.renderer, handle);
        }

        tracing::info!(
            station = %station.name,
            within_inner = placement.within_inner,
            within_outer = placement.within_outer,
            "Station placed"
        );
        metrics().increment("stations_added");
        metrics().increment_by("overlaps_drawn", placement.overlaps.len() as u64);

        let notification = Notification::StationAdded {
            name: station.name.clone(),
            within_inner: placement.within_inner,
            within_outer: placement.within_outer,
        };
        self.notify(notification);

        self.redraw_uncovered();
        self.summary = self.model.coverage_summary();
        self.refresh_heatmap();
    }

    fn redraw_uncovered(&mut self) {
        for handle in self.uncovered_markers.drain(..) {
            self.renderer.drop_layer(handle);
        }

        let style = MarkerStyle::solid("red", 5.0);
        for asset in self.model.uncovered_assets() {
            let handle = self.renderer.draw_marker(asset.coordinate, &style, &asset.name);
            self.uncovered_markers.push(handle);
        }
    }

    fn refresh_heatmap(&mut self) {
        self.heatmap
            .refresh(&mut self.renderer, &self.model, self.heatmap_visible);
    }

    fn notify(&mut self, notification: Notification) {
        tracing::info!(%notification, "Notification");
        self.notifications.push(notification);
    }

    /// Summary panel values as of the last station addition.
    pub fn summary(&self) -> CoverageSummary {
        self.summary
    }

    /// The coverage model.
    pub fn model(&self) -> &CoverageModel<G> {
        &self.model
    }

    /// The map.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Recorded overlap layers.
    pub fn overlays(&self) -> &OverlayLayers {
        &self.overlays
    }

    /// Notifications not yet taken.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Takes all pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Whether map clicks currently place stations.
    pub fn is_adding_user_station(&self) -> bool {
        self.adding_user_station
    }

    /// Ends the session and returns the map.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
