//! Floating/anchored selection overlay

use std::collections::BTreeMap;

use crate::coord::{TileCoord, TileRect};
use crate::grid::TileGrid;
use crate::stack::TileStack;

/// Snapshots of tile stacks lifted from, or about to be written into, a grid.
///
/// An entry keyed `k` belongs to grid cell `k + offset`. Entries are copies:
/// editing the grid afterwards never changes what the selection holds.
///
/// Cloning deep-copies the entry map along with the offset and float flag,
/// which is what deletion-undo restores from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileSelection {
    tiles: BTreeMap<TileCoord, TileStack>,
    offset: TileCoord,
    floating: bool,
}

impl TileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether grid cell `coord` is covered: an entry at `coord` while
    /// anchored, or at `coord - offset` while floating.
    pub fn coverage_at(&self, coord: TileCoord) -> bool {
        if self.floating {
            self.tiles.contains_key(&(coord - self.offset))
        } else {
            self.tiles.contains_key(&coord)
        }
    }

    /// Whether an entry exists under this key (ignores the offset)
    pub fn contains(&self, key: TileCoord) -> bool {
        self.tiles.contains_key(&key)
    }

    /// Add entries for `coords`, snapshotting each from `grid` at
    /// `coord + offset`. Empty cells are captured as empty stacks. Keys that
    /// already have an entry keep their existing snapshot.
    pub fn add_tiles(&mut self, coords: impl IntoIterator<Item = TileCoord>, grid: &TileGrid) {
        for coord in coords {
            if self.tiles.contains_key(&coord) {
                continue;
            }
            let snapshot = grid.stack(coord + self.offset).cloned().unwrap_or_default();
            self.tiles.insert(coord, snapshot);
        }
    }

    /// Remove entries for `coords` and return what was removed, in key order
    pub fn remove_tiles(&mut self, coords: impl IntoIterator<Item = TileCoord>) -> Vec<(TileCoord, TileStack)> {
        let mut removed: Vec<_> = coords
            .into_iter()
            .filter_map(|coord| self.tiles.remove(&coord).map(|stack| (coord, stack)))
            .collect();
        removed.sort_by_key(|(coord, _)| *coord);
        removed
    }

    /// Put previously captured entries back as they were
    pub fn insert_entries(&mut self, entries: impl IntoIterator<Item = (TileCoord, TileStack)>) {
        self.tiles.extend(entries);
    }

    pub fn float(&mut self) {
        self.floating = true;
    }

    pub fn defloat(&mut self) {
        self.floating = false;
    }

    pub fn is_floating(&self) -> bool {
        self.floating
    }

    pub fn offset(&self) -> TileCoord {
        self.offset
    }

    pub fn set_offset(&mut self, offset: TileCoord) {
        self.offset = offset;
    }

    pub fn stack(&self, key: TileCoord) -> Option<&TileStack> {
        self.tiles.get(&key)
    }

    /// Entries in row-major key order
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &TileStack)> {
        self.tiles.iter().map(|(coord, stack)| (*coord, stack))
    }

    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.tiles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Bounding rectangle of the entry keys, `None` when empty
    pub fn bounds(&self) -> Option<TileRect> {
        let mut coords = self.tiles.keys();
        let first = *coords.next()?;
        Some(coords.fold(TileRect::new(first.x, first.y, 1, 1), |rect, c| rect.include(*c)))
    }
}
