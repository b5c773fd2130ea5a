//! GeoJSON canvas: an in-memory [`RenderAdapter`].
//!
//! Every drawn layer becomes one GeoJSON feature carrying its style as
//! properties. Removed layers are kept but hidden, so they can be re-added
//! without being rebuilt; dropped layers are deleted outright.
//! [`GeoJsonCanvas::to_feature_collection`] emits the visible layers in draw
//! order, plus the current view as a foreign member.

use crate::render::{HeatPoint, HeatmapStyle, LayerHandle, MarkerStyle, PolygonStyle, RenderAdapter};
use crate::Result;
use geo::{BoundingRect, MultiPoint, MultiPolygon, Point, Rect};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use responder_geo::Coordinate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;

/// Initial map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// View center
    pub center: Coordinate,
    /// Zoom level
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Coordinate::new(21.1466, 79.0888),
            zoom: 7,
        }
    }
}

/// What a layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Circle marker
    Marker,
    /// Filled polygon
    Polygon,
    /// Heatmap
    Heatmap,
}

/// One drawn layer.
#[derive(Debug, Clone)]
pub struct Layer {
    handle: LayerHandle,
    kind: LayerKind,
    visible: bool,
    feature: Feature,
    bounds: Option<Rect<f64>>,
}

impl Layer {
    /// Handle returned when the layer was drawn.
    pub fn handle(&self) -> LayerHandle {
        self.handle
    }

    /// Layer type.
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Whether the layer is currently on the map.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The GeoJSON feature for this layer.
    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    /// A string property of the feature, if present.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.feature.properties.as_ref()?.get(key)?.as_str()
    }
}

/// Collects layers and writes them as GeoJSON.
#[derive(Debug, Clone)]
pub struct GeoJsonCanvas {
    view: MapView,
    fitted: Option<Rect<f64>>,
    layers: BTreeMap<LayerHandle, Layer>,
    next_handle: u64,
}

impl GeoJsonCanvas {
    /// Empty canvas with an initial view.
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            fitted: None,
            layers: BTreeMap::new(),
            next_handle: 0,
        }
    }

    /// Live layers in draw order, visible or not.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.values()
    }

    /// Number of live layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Looks up a layer.
    pub fn layer(&self, handle: LayerHandle) -> Option<&Layer> {
        self.layers.get(&handle)
    }

    /// Visible layers in draw order.
    pub fn visible_layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.values().filter(|layer| layer.visible)
    }

    /// Extent of the last layer passed to `fit_to_bounds`.
    pub fn fitted_bounds(&self) -> Option<Rect<f64>> {
        self.fitted
    }

    /// Visible layers as a feature collection.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let bounds = self
            .fitted
            .map(|r| json!([r.min().x, r.min().y, r.max().x, r.max().y]));

        let mut foreign_members = JsonObject::new();
        foreign_members.insert(
            "view".to_string(),
            json!({
                "center": [self.view.center.longitude, self.view.center.latitude],
                "zoom": self.view.zoom,
                "bounds": bounds,
            }),
        );

        FeatureCollection {
            bbox: None,
            features: self.visible_layers().map(|layer| layer.feature.clone()).collect(),
            foreign_members: Some(foreign_members),
        }
    }

    /// Writes the visible layers to `path`, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let body = serde_json::to_string_pretty(&self.to_feature_collection())?;
        std::fs::write(path.as_ref(), body)?;
        tracing::info!(path = %path.as_ref().display(), layers = self.visible_layers().count(), "Map written");
        Ok(())
    }

    fn push(
        &mut self,
        kind: LayerKind,
        value: geojson::Value,
        mut properties: JsonObject,
        bounds: Option<Rect<f64>>,
    ) -> LayerHandle {
        let handle = LayerHandle(self.next_handle);
        self.next_handle += 1;
        properties.insert("layer".to_string(), json!(handle.0));
        properties.insert("kind".to_string(), json!(kind));

        self.layers.insert(handle, Layer {
            handle,
            kind,
            visible: true,
            feature: Feature {
                bbox: None,
                geometry: Some(Geometry::new(value)),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            },
            bounds,
        });
        handle
    }

    fn set_visible(&mut self, handle: LayerHandle, visible: bool) {
        match self.layers.get_mut(&handle) {
            Some(layer) => layer.visible = visible,
            None => tracing::warn!(layer = handle.0, "Unknown layer handle"),
        }
    }
}

fn style_properties(style: &impl Serialize) -> JsonObject {
    match serde_json::to_value(style) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => JsonObject::new(),
    }
}

impl RenderAdapter for GeoJsonCanvas {
    fn draw_marker(&mut self, at: Coordinate, style: &MarkerStyle, label: &str) -> LayerHandle {
        let point = Point::from(at.to_coord());
        let mut properties = style_properties(style);
        properties.insert("label".to_string(), json!(label));

        self.push(
            LayerKind::Marker,
            geojson::Value::from(&point),
            properties,
            Some(point.bounding_rect()),
        )
    }

    fn draw_polygon(&mut self, shape: &MultiPolygon<f64>, style: &PolygonStyle) -> LayerHandle {
        self.push(
            LayerKind::Polygon,
            geojson::Value::from(shape),
            style_properties(style),
            shape.bounding_rect(),
        )
    }

    fn draw_heatmap(&mut self, points: &[HeatPoint], style: &HeatmapStyle) -> LayerHandle {
        let multi: MultiPoint<f64> = points
            .iter()
            .map(|p| Point::from(p.coordinate.to_coord()))
            .collect();
        let mut properties = style_properties(style);
        properties.insert(
            "intensities".to_string(),
            json!(points.iter().map(|p| p.intensity).collect::<Vec<_>>()),
        );

        self.push(
            LayerKind::Heatmap,
            geojson::Value::from(&multi),
            properties,
            multi.bounding_rect(),
        )
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        self.set_visible(handle, false);
    }

    fn add_layer(&mut self, handle: LayerHandle) {
        self.set_visible(handle, true);
    }

    fn drop_layer(&mut self, handle: LayerHandle) {
        if self.layers.remove(&handle).is_none() {
            tracing::warn!(layer = handle.0, "Unknown layer handle");
        }
    }

    fn fit_to_bounds(&mut self, handle: LayerHandle) {
        match self.layer(handle).map(|layer| layer.bounds) {
            Some(Some(bounds)) => self.fitted = Some(bounds),
            Some(None) => tracing::debug!(layer = handle.0, "Layer has no extent"),
            None => tracing::warn!(layer = handle.0, "Unknown layer handle"),
        }
    }
}
