//! Test helpers for `stackmap_editor` commands.
//!
//! State factories and snapshot helpers for use in `#[cfg(test)]` modules
//! within this crate. Import the whole module via glob:
//!
//! ```rust,ignore
//! #[cfg(test)]
//! mod tests {
//!     use crate::testing::*;
//! }
//! ```
#![allow(dead_code)]

use stackmap_core::{
    GridAccess, MultiTileLayer, SelectionLayer, Tile, TileCoord, TileGrid, TilePool, TileSelection,
    TileStack,
};

/// 8x8 grid of 16px cells plus `n` distinct tiles from one pool
pub fn grid_and_tiles(n: u32) -> (TileGrid, Vec<Tile>) {
    (TileGrid::new(8, 8, 16, 16), tiles(n))
}

/// 8x8 layer named "Ground" plus `n` distinct tiles
pub fn layer_and_tiles(n: u32) -> (MultiTileLayer, Vec<Tile>) {
    (MultiTileLayer::new("Ground", 8, 8, 16, 16), tiles(n))
}

pub fn tiles(n: u32) -> Vec<Tile> {
    let mut pool = TilePool::new("Fixture", 16, 16);
    (0..n).map(|i| pool.add_tile(i)).collect()
}

pub fn coords(pairs: &[(i32, i32)]) -> Vec<TileCoord> {
    pairs.iter().map(|&p| p.into()).collect()
}

/// Every stored grid entry, empty stacks included
pub fn grid_snapshot(grid: &TileGrid) -> Vec<(TileCoord, TileStack)> {
    grid.entries()
        .map(|(coord, stack)| (coord, stack.clone()))
        .collect()
}

/// Everything a selection command can touch on a layer
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSnapshot {
    pub cells: Vec<(TileCoord, TileStack)>,
    pub selection: Option<TileSelection>,
}

pub fn layer_snapshot(layer: &MultiTileLayer) -> LayerSnapshot {
    LayerSnapshot {
        cells: grid_snapshot(layer.grid()),
        selection: layer.selection().cloned(),
    }
}

/// Assert that the selection holds exactly these keys
pub fn assert_selection_keys(layer: &MultiTileLayer, expected: &[(i32, i32)]) {
    let selection = layer.selection().expect("layer has no selection");
    let actual: Vec<TileCoord> = selection.coords().collect();
    let mut expected = coords(expected);
    expected.sort();
    assert_eq!(actual, expected, "selection keys differ");
}
