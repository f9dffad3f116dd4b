//! Ordered tile references occupying one grid cell

use std::ops::Index;
use thiserror::Error;

use crate::listeners::{ListenerId, Listeners};
use crate::tile::Tile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("Tile index {index} out of range for stack of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Raised once per mutating call on a [`TileStack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackEvent;

/// Tile references for one cell, index 0 = bottom.
///
/// `add`, `remove` and `clear` each raise exactly one [`StackEvent`], even when
/// the call leaves the stack unchanged (e.g. removing a tile that is not
/// present). Observers that care about real changes compare contents.
///
/// `Clone` copies the reference list; the tiles themselves are shared.
#[derive(Debug, Clone, Default)]
pub struct TileStack {
    tiles: Vec<Tile>,
    listeners: Listeners<StackEvent>,
}

impl TileStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
            listeners: Listeners::new(),
        }
    }

    /// Push a tile on top
    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile);
        self.modified();
    }

    /// Remove the first (lowest) matching reference, if any
    pub fn remove(&mut self, tile: &Tile) {
        if let Some(pos) = self.tiles.iter().position(|t| t == tile) {
            self.tiles.remove(pos);
        }
        self.modified();
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.modified();
    }

    /// Append every tile of `other`, bottom first
    pub fn merge(&mut self, other: &TileStack) {
        self.tiles.extend(other.tiles.iter().cloned());
        self.modified();
    }

    pub fn get(&self, index: usize) -> Result<&Tile, StackError> {
        self.tiles.get(index).ok_or(StackError::IndexOutOfRange {
            index,
            len: self.tiles.len(),
        })
    }

    /// Topmost tile
    pub fn top(&self) -> Option<&Tile> {
        self.tiles.last()
    }

    pub fn contains(&self, tile: &Tile) -> bool {
        self.tiles.contains(tile)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&StackEvent) + Send + Sync + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn modified(&self) {
        self.listeners.emit(&StackEvent);
    }
}

impl PartialEq for TileStack {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for TileStack {}

impl Index<usize> for TileStack {
    type Output = Tile;

    /// Panics when `index` is outside `[0, len)`; use [`TileStack::get`] to check.
    fn index(&self, index: usize) -> &Tile {
        match self.get(index) {
            Ok(tile) => tile,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a> IntoIterator for &'a TileStack {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

impl FromIterator<Tile> for TileStack {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        TileStack::from_tiles(iter)
    }
}
