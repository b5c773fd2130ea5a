//! Coverage dashboard.
//!
//! A [`Dashboard`] owns the coverage model and a [`RenderAdapter`], and turns
//! interaction events ([`UiEvent`]) into model updates and drawing calls.
//! [`GeoJsonCanvas`] is the bundled adapter: it keeps every layer in memory
//! and writes the visible ones as a GeoJSON `FeatureCollection`.
//!
//! # Example
//!
//! ```
//! use responder_dashboard::{Dashboard, DashboardOptions, GeoJsonCanvas, MapView, UiEvent};
//! use responder_geo::{generate_assets, BufferRadii, CoverageModel, GeneratorWindow};
//!
//! let model = CoverageModel::planar(
//!     BufferRadii::default(),
//!     generate_assets(&GeneratorWindow::default()),
//! );
//! let canvas = GeoJsonCanvas::new(MapView::default());
//! let mut dashboard = Dashboard::new(model, canvas, DashboardOptions::default());
//!
//! dashboard.dispatch(UiEvent::SuggestLocation);
//! assert_eq!(dashboard.model().stations().len(), 1);
//! ```

mod canvas;
mod controller;
mod error;
mod heatmap;
mod isochrone;
mod overlays;
mod render;

pub use canvas::{GeoJsonCanvas, Layer, LayerKind, MapView};
pub use controller::{Dashboard, DashboardOptions, Notification, UiEvent};
pub use error::{RenderError, RenderErrorCode, Result};
pub use heatmap::{uncovered_heat_points, UncoveredHeatmap, UNCOVERED_INTENSITY};
pub use isochrone::{sample_isochrones, Isochrone, IsochroneManager, DEFAULT_ISOCHRONE_COLOR};
pub use overlays::OverlayLayers;
pub use render::{HeatPoint, HeatmapStyle, LayerHandle, MarkerStyle, PolygonStyle, RenderAdapter};
