//! Derived tile -> cell index kept in step with a grid

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{trace, warn};
use uuid::Uuid;

use crate::coord::TileCoord;
use crate::grid::TileGrid;
use crate::listeners::ListenerId;
use crate::tile::{Tile, TilePool};

/// Which cells of a grid reference each tile.
///
/// Grid and pool notifications only mark the index stale; the next query
/// rebuilds it from the grid. Queries must pass the grid the index was
/// attached to; any other grid gets an empty answer.
#[derive(Debug)]
pub struct TileUsageIndex {
    grid: Uuid,
    stale: Arc<AtomicBool>,
    cells: HashMap<Uuid, Vec<TileCoord>>,
    grid_listener: ListenerId,
}

impl TileUsageIndex {
    /// Start tracking `grid`. The index is built on first query.
    pub fn attach(grid: &mut TileGrid) -> Self {
        let stale = Arc::new(AtomicBool::new(true));
        let flag = stale.clone();
        let grid_listener = grid.subscribe(move |_| flag.store(true, Ordering::Relaxed));
        Self {
            grid: grid.id(),
            stale,
            cells: HashMap::new(),
            grid_listener,
        }
    }

    /// Also invalidate whenever `pool` gains or loses tiles
    pub fn watch_pool(&self, pool: &mut TilePool) -> ListenerId {
        let flag = self.stale.clone();
        pool.subscribe(move |_| flag.store(true, Ordering::Relaxed))
    }

    /// Stop listening to `grid`
    pub fn detach(self, grid: &mut TileGrid) {
        if grid.id() == self.grid {
            grid.unsubscribe(self.grid_listener);
        }
    }

    /// Whether this index tracks `grid`
    pub fn is_attached_to(&self, grid: &TileGrid) -> bool {
        grid.id() == self.grid
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Relaxed)
    }

    /// Cells whose stacks contain `tile`, row-major, one entry per occurrence
    pub fn cells_using(&mut self, grid: &TileGrid, tile: &Tile) -> &[TileCoord] {
        if !self.is_attached_to(grid) {
            warn!("Usage index queried with a grid it is not attached to");
            return &[];
        }
        self.refresh(grid);
        self.cells.get(&tile.id()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn usage_count(&mut self, grid: &TileGrid, tile: &Tile) -> usize {
        self.cells_using(grid, tile).len()
    }

    pub fn is_used(&mut self, grid: &TileGrid, tile: &Tile) -> bool {
        self.usage_count(grid, tile) > 0
    }

    fn refresh(&mut self, grid: &TileGrid) {
        if !self.stale.swap(false, Ordering::Relaxed) {
            return;
        }
        self.cells.clear();
        for (coord, stack) in grid.iter() {
            for tile in stack {
                self.cells.entry(tile.id()).or_default().push(coord);
            }
        }
        trace!("Rebuilt tile usage index: {} distinct tiles", self.cells.len());
    }
}
