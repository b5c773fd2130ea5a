//! Heatmap of uncovered assets.

use crate::render::{HeatPoint, HeatmapStyle, LayerHandle, RenderAdapter};
use responder_geo::{CoverageModel, GeometryProvider};

/// Weight given to every uncovered asset.
pub const UNCOVERED_INTENSITY: f64 = 0.5;

/// One heat point per uncovered asset, in asset order.
pub fn uncovered_heat_points<G: GeometryProvider>(model: &CoverageModel<G>) -> Vec<HeatPoint> {
    model
        .uncovered_assets()
        .map(|asset| HeatPoint {
            coordinate: asset.coordinate,
            intensity: UNCOVERED_INTENSITY,
        })
        .collect()
}

/// The single heatmap layer, rebuilt on every refresh.
#[derive(Debug, Clone, Default)]
pub struct UncoveredHeatmap {
    layer: Option<LayerHandle>,
    style: HeatmapStyle,
}

impl UncoveredHeatmap {
    /// Heatmap drawn with `style`.
    pub fn new(style: HeatmapStyle) -> Self {
        Self { layer: None, style }
    }

    /// Drops the previous layer and, when `show` is set, draws a fresh one.
    pub fn refresh<R, G>(&mut self, renderer: &mut R, model: &CoverageModel<G>, show: bool)
    where
        R: RenderAdapter,
        G: GeometryProvider,
    {
        if let Some(previous) = self.layer.take() {
            renderer.drop_layer(previous);
        }

        if show {
            let points = uncovered_heat_points(model);
            tracing::debug!(points = points.len(), "Heatmap redrawn");
            self.layer = Some(renderer.draw_heatmap(&points, &self.style));
        }
    }

    /// The current layer, if one is shown.
    pub fn layer(&self) -> Option<LayerHandle> {
        self.layer
    }
}
