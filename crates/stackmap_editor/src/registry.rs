//! Static registry of layer presenters
//!
//! Presenters turn a layer into draw calls. The registry is built once from
//! an explicit list of `(LayerKind, factory)` pairs; nothing is discovered at
//! runtime.

use stackmap_core::{GridAccess, MultiTileLayer, NamedResource, SelectionLayer, Tile, TileCoord, TileRect};
use tracing::trace;

/// Kinds of layer content a presenter can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Stacked tiles stored in the layer's grid
    Tiles,
    /// Content carried by a floating selection
    FloatingSelection,
}

/// Receives draw calls from presenters
pub trait DrawSink {
    /// `depth` is the tile's position in its stack, 0 being the bottom
    fn draw_tile(&mut self, coord: TileCoord, depth: usize, tile: &Tile, opacity: f32);
}

pub trait LayerPresenter: Send + Sync {
    fn present(&self, layer: &MultiTileLayer, view: TileRect, sink: &mut dyn DrawSink);
}

/// Builds a presenter for one layer
pub type PresenterFactory = fn(&MultiTileLayer) -> Box<dyn LayerPresenter>;

/// Draws every non-empty grid cell in view, each stack bottom-to-top
pub struct StackPresenter {
    opacity: f32,
}

impl StackPresenter {
    pub fn boxed(layer: &MultiTileLayer) -> Box<dyn LayerPresenter> {
        Box::new(Self {
            opacity: layer.opacity,
        })
    }
}

impl LayerPresenter for StackPresenter {
    fn present(&self, layer: &MultiTileLayer, view: TileRect, sink: &mut dyn DrawSink) {
        if !layer.visible {
            return;
        }
        for (coord, stack) in layer.grid().region(view) {
            for (depth, tile) in stack.iter().enumerate() {
                sink.draw_tile(coord, depth, tile, self.opacity);
            }
        }
    }
}

/// Draws a floating selection's snapshots at their offset position
pub struct FloatingSelectionPresenter {
    opacity: f32,
}

impl FloatingSelectionPresenter {
    pub fn boxed(layer: &MultiTileLayer) -> Box<dyn LayerPresenter> {
        Box::new(Self {
            opacity: layer.opacity,
        })
    }
}

impl LayerPresenter for FloatingSelectionPresenter {
    fn present(&self, layer: &MultiTileLayer, view: TileRect, sink: &mut dyn DrawSink) {
        if !layer.visible {
            return;
        }
        let Some(selection) = layer.selection().filter(|s| s.is_floating()) else {
            return;
        };
        let offset = selection.offset();
        for (key, stack) in selection.iter() {
            let coord = key + offset;
            if !view.contains(coord) {
                continue;
            }
            for (depth, tile) in stack.iter().enumerate() {
                sink.draw_tile(coord, depth, tile, self.opacity);
            }
        }
    }
}

/// Registry of presenter factories, in draw order
#[derive(Clone)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct LayerPresenterRegistry {
    factories: Vec<(LayerKind, PresenterFactory)>,
}

impl LayerPresenterRegistry {
    /// Later entries for a kind already registered are ignored
    pub fn new(entries: impl IntoIterator<Item = (LayerKind, PresenterFactory)>) -> Self {
        let mut factories: Vec<(LayerKind, PresenterFactory)> = Vec::new();
        for (kind, factory) in entries {
            if factories.iter().any(|(k, _)| *k == kind) {
                continue;
            }
            factories.push((kind, factory));
        }
        Self { factories }
    }

    pub fn contains(&self, kind: LayerKind) -> bool {
        self.factories.iter().any(|(k, _)| *k == kind)
    }

    /// Registered kinds, in draw order
    pub fn kinds(&self) -> impl Iterator<Item = LayerKind> + '_ {
        self.factories.iter().map(|(kind, _)| *kind)
    }

    pub fn create(&self, kind: LayerKind, layer: &MultiTileLayer) -> Option<Box<dyn LayerPresenter>> {
        self.factories
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, factory)| factory(layer))
    }

    /// Run every registered presenter over `layer`, in registration order
    pub fn present(&self, layer: &MultiTileLayer, view: TileRect, sink: &mut dyn DrawSink) {
        trace!("Presenting layer '{}' over {:?}", layer.name(), view);
        for (_, factory) in &self.factories {
            factory(layer).present(layer, view, sink);
        }
    }
}

impl std::fmt::Debug for LayerPresenterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

impl Default for LayerPresenterRegistry {
    fn default() -> Self {
        Self::new([
            (LayerKind::Tiles, StackPresenter::boxed as PresenterFactory),
            (LayerKind::FloatingSelection, FloatingSelectionPresenter::boxed),
        ])
    }
}
