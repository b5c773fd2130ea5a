//! Rendering adapter contract and layer styles.

use geo::MultiPolygon;
use responder_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Opaque reference to a drawn layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerHandle(pub u64);

/// Circle marker appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Radius in pixels
    pub radius: f64,
    /// Stroke color
    pub color: String,
    /// Fill color
    pub fill_color: String,
    /// Fill opacity in [0, 1]
    pub fill_opacity: f64,
}

impl MarkerStyle {
    /// Solid marker of one color.
    pub fn solid(color: &str, radius: f64) -> Self {
        Self {
            radius,
            color: color.to_string(),
            fill_color: color.to_string(),
            fill_opacity: 1.0,
        }
    }
}

/// Polygon appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    /// Stroke color
    pub color: String,
    /// Stroke width in pixels, adapter default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Fill opacity in [0, 1]
    pub fill_opacity: f64,
}

impl PolygonStyle {
    /// Outline color with a translucent fill.
    pub fn new(color: &str, fill_opacity: f64) -> Self {
        Self {
            color: color.to_string(),
            weight: None,
            fill_opacity,
        }
    }

    /// Sets the stroke width.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Heatmap appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapStyle {
    /// Point radius in pixels
    pub radius: f64,
    /// Blur in pixels
    pub blur: f64,
    /// Zoom at which points reach full intensity
    pub max_zoom: u8,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            radius: 25.0,
            blur: 15.0,
            max_zoom: 13,
        }
    }
}

/// A weighted heatmap sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    /// Position
    pub coordinate: Coordinate,
    /// Weight in [0, 1]
    pub intensity: f64,
}

/// Drawing surface the dashboard writes to. Nothing is read back.
pub trait RenderAdapter {
    /// Draws a circle marker with a popup label.
    fn draw_marker(&mut self, at: Coordinate, style: &MarkerStyle, label: &str) -> LayerHandle;

    /// Draws a filled polygon.
    fn draw_polygon(&mut self, shape: &MultiPolygon<f64>, style: &PolygonStyle) -> LayerHandle;

    /// Draws a heatmap layer.
    fn draw_heatmap(&mut self, points: &[HeatPoint], style: &HeatmapStyle) -> LayerHandle;

    /// Takes a layer off the map. The layer can be shown again with
    /// [`RenderAdapter::add_layer`].
    fn remove_layer(&mut self, handle: LayerHandle);

    /// Puts a previously removed layer back on the map.
    fn add_layer(&mut self, handle: LayerHandle);

    /// Deletes a layer that is being replaced. Unlike
    /// [`RenderAdapter::remove_layer`], the handle cannot be shown again.
    fn drop_layer(&mut self, handle: LayerHandle);

    /// Moves the view to the extent of a layer.
    fn fit_to_bounds(&mut self, handle: LayerHandle);
}
