//! Overlap layer tracking.

use crate::render::{LayerHandle, RenderAdapter};

/// Drawn overlap regions, shown or hidden as one group.
///
/// Records are never removed, matching the append-only buffer set.
#[derive(Debug, Clone)]
pub struct OverlayLayers {
    handles: Vec<LayerHandle>,
    visible: bool,
}

impl OverlayLayers {
    /// Empty group with the given initial visibility.
    pub fn new(visible: bool) -> Self {
        Self {
            handles: Vec::new(),
            visible,
        }
    }

    /// Appends a drawn overlap. A hidden group hides it right away.
    pub fn record<R: RenderAdapter>(&mut self, renderer: &mut R, handle: LayerHandle) {
        if !self.visible {
            renderer.remove_layer(handle);
        }
        self.handles.push(handle);
    }

    /// Shows or hides every recorded overlap without recomputing any.
    pub fn set_visible<R: RenderAdapter>(&mut self, renderer: &mut R, visible: bool) {
        self.visible = visible;
        for &handle in &self.handles {
            if visible {
                renderer.add_layer(handle);
            } else {
                renderer.remove_layer(handle);
            }
        }
        tracing::debug!(visible, overlaps = self.handles.len(), "Overlap visibility changed");
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Recorded layers in creation order.
    pub fn handles(&self) -> &[LayerHandle] {
        &self.handles
    }

    /// Number of recorded overlaps.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Default for OverlayLayers {
    fn default() -> Self {
        Self::new(true)
    }
}
