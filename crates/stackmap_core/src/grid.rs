//! Sparse, bounded grid of tile stacks

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::coord::{TileCoord, TileRect};
use crate::listeners::{ListenerId, Listeners};
use crate::stack::TileStack;
use crate::tile::Tile;

/// Cell and pixel dimensions of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl GridSize {
    /// Saturates at `u32::MAX`
    pub fn pixel_width(&self) -> u32 {
        self.width.saturating_mul(self.tile_width)
    }

    /// Saturates at `u32::MAX`
    pub fn pixel_height(&self) -> u32 {
        self.height.saturating_mul(self.tile_height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// The stack at this cell was written
    CellModified(TileCoord),
    SizeChanged { old: GridSize, new: GridSize },
}

/// Sparse mapping of cells to tile stacks.
///
/// A cell can be absent (no entry) or hold a stack, possibly empty; the two
/// states are kept distinct so edits can be reverted exactly. Region queries
/// only ever report non-empty stacks.
///
/// The grid does not enforce its bounds on writes. Callers check
/// [`TileGrid::in_bounds`] before writing; cells outside the bounds (e.g.
/// after shrinking) are kept but excluded from [`TileGrid::iter`].
///
/// Every grid, clones included, has its own [`TileGrid::id`].
#[derive(Debug)]
pub struct TileGrid {
    id: Uuid,
    size: GridSize,
    pixel_width: u32,
    pixel_height: u32,
    cells: BTreeMap<TileCoord, TileStack>,
    listeners: Listeners<GridEvent>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
        let size = GridSize {
            width,
            height,
            tile_width,
            tile_height,
        };
        Self {
            id: Uuid::new_v4(),
            size,
            pixel_width: size.pixel_width(),
            pixel_height: size.pixel_height(),
            cells: BTreeMap::new(),
            listeners: Listeners::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    pub fn bounds(&self) -> TileRect {
        TileRect::new(0, 0, self.size.width, self.size.height)
    }

    pub fn in_bounds(&self, coord: TileCoord) -> bool {
        self.bounds().contains(coord)
    }

    /// Stack stored at `coord`; `None` when the cell has no entry
    pub fn stack(&self, coord: TileCoord) -> Option<&TileStack> {
        self.cells.get(&coord)
    }

    /// Replace the cell's entry. `None` removes it.
    pub fn set_stack(&mut self, coord: TileCoord, stack: Option<TileStack>) {
        match stack {
            Some(stack) => {
                self.cells.insert(coord, stack);
            }
            None => {
                self.cells.remove(&coord);
            }
        }
        self.cell_modified(coord);
    }

    pub fn add_tile(&mut self, coord: TileCoord, tile: Tile) {
        self.cells.entry(coord).or_default().add(tile);
        self.cell_modified(coord);
    }

    pub fn remove_tile(&mut self, coord: TileCoord, tile: &Tile) {
        if let Some(stack) = self.cells.get_mut(&coord) {
            stack.remove(tile);
        }
        self.cell_modified(coord);
    }

    pub fn clear_cell(&mut self, coord: TileCoord) {
        self.set_stack(coord, None);
    }

    /// Non-empty cells intersecting `rect`, row-major.
    ///
    /// Rows are clipped to the span of stored entries, so the walk is bounded
    /// by the grid's content rather than by the size of `rect`.
    pub fn region(&self, rect: TileRect) -> impl Iterator<Item = (TileCoord, &TileStack)> + '_ {
        let (left, right) = (rect.x, rect.right());
        let rows = match (self.cells.keys().next(), self.cells.keys().next_back()) {
            (Some(first), Some(last)) if left < right => {
                rect.y.max(first.y)..rect.bottom().min(last.y.saturating_add(1))
            }
            _ => 0..0,
        };
        rows.flat_map(move |y| {
            self.cells
                .range(TileCoord::new(left, y)..TileCoord::new(right, y))
        })
        .filter(|(_, stack)| !stack.is_empty())
        .map(|(coord, stack)| (*coord, stack))
    }

    /// Every non-empty cell within the grid bounds, row-major
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &TileStack)> + '_ {
        self.region(self.bounds())
    }

    /// Every stored entry, including empty stacks and out-of-bounds cells
    pub fn entries(&self) -> impl Iterator<Item = (TileCoord, &TileStack)> + '_ {
        self.cells.iter().map(|(coord, stack)| (*coord, stack))
    }

    pub fn entry_count(&self) -> usize {
        self.cells.len()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let new = GridSize {
            width,
            height,
            ..self.size
        };
        self.apply_size(new);
    }

    pub fn set_tile_size(&mut self, tile_width: u32, tile_height: u32) {
        let new = GridSize {
            tile_width,
            tile_height,
            ..self.size
        };
        self.apply_size(new);
    }

    pub fn subscribe(&mut self, listener: impl Fn(&GridEvent) + Send + Sync + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn apply_size(&mut self, new: GridSize) {
        let old = self.size;
        if old == new {
            return;
        }
        self.size = new;
        self.pixel_width = new.pixel_width();
        self.pixel_height = new.pixel_height();
        self.listeners.emit(&GridEvent::SizeChanged { old, new });
    }

    fn cell_modified(&self, coord: TileCoord) {
        self.listeners.emit(&GridEvent::CellModified(coord));
    }
}

impl Clone for TileGrid {
    fn clone(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            size: self.size,
            pixel_width: self.pixel_width,
            pixel_height: self.pixel_height,
            cells: self.cells.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

/// Access to the grid a command edits
pub trait GridAccess {
    fn grid(&self) -> &TileGrid;
    fn grid_mut(&mut self) -> &mut TileGrid;
}

impl GridAccess for TileGrid {
    fn grid(&self) -> &TileGrid {
        self
    }

    fn grid_mut(&mut self) -> &mut TileGrid {
        self
    }
}
