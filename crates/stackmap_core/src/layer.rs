//! Multi-tile layers and the selection interface commands operate on

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::coord::TileCoord;
use crate::grid::{GridAccess, TileGrid};
use crate::listeners::{ListenerId, Listeners};
use crate::named::{CollectionHooks, NamedResource};
use crate::selection::TileSelection;
use crate::stack::TileStack;

/// Selection lifecycle notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEvent {
    Created,
    Deleted,
    Restored,
    Modified,
    Floated,
    Defloated,
    Moved { old: TileCoord, new: TileCoord },
}

/// A layer that owns a grid and at most one tile selection.
///
/// Selection commands are written purely against this trait. Operations that
/// need a selection do nothing when there is none.
pub trait SelectionLayer: GridAccess {
    fn selection(&self) -> Option<&TileSelection>;

    fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    /// Start a new, empty, anchored selection (replacing any current one)
    fn create_selection(&mut self);

    /// Drop the selection and hand it back
    fn delete_selection(&mut self) -> Option<TileSelection>;

    /// Reinstate a selection captured earlier
    fn restore_selection(&mut self, snapshot: TileSelection);

    /// Mark the selection floating. Grid content is not touched.
    fn float_selection(&mut self);

    /// Mark the selection anchored. Grid content is not touched.
    fn defloat_selection(&mut self);

    /// Snapshot the grid at `coords` into the selection
    fn add_tiles_to_selection(&mut self, coords: &[TileCoord]);

    fn remove_tiles_from_selection(&mut self, coords: &[TileCoord]) -> Vec<(TileCoord, TileStack)>;

    /// Put back entries previously returned by `remove_tiles_from_selection`
    fn insert_selection_entries(&mut self, entries: Vec<(TileCoord, TileStack)>);

    fn set_selection_offset(&mut self, offset: TileCoord);
}

/// Named tile layer whose cells hold stacks of tiles
#[derive(Debug, Clone)]
pub struct MultiTileLayer {
    name: String,
    pub visible: bool,
    pub opacity: f32,
    grid: TileGrid,
    selection: Option<TileSelection>,
    listeners: Listeners<SelectionEvent>,
}

impl MultiTileLayer {
    pub fn new(name: impl Into<String>, width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
        Self::with_grid(name, TileGrid::new(width, height, tile_width, tile_height))
    }

    pub fn with_grid(name: impl Into<String>, grid: TileGrid) -> Self {
        Self {
            name: name.into(),
            visible: true,
            opacity: 1.0,
            grid,
            selection: None,
            listeners: Listeners::new(),
        }
    }

    pub fn selection_mut(&mut self) -> Option<&mut TileSelection> {
        self.selection.as_mut()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&SelectionEvent) + Send + Sync + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn with_selection(&mut self, event: SelectionEvent, f: impl FnOnce(&mut TileSelection)) {
        if let Some(selection) = self.selection.as_mut() {
            f(selection);
            self.listeners.emit(&event);
        }
    }
}

impl GridAccess for MultiTileLayer {
    fn grid(&self) -> &TileGrid {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }
}

impl SelectionLayer for MultiTileLayer {
    fn selection(&self) -> Option<&TileSelection> {
        self.selection.as_ref()
    }

    fn create_selection(&mut self) {
        self.selection = Some(TileSelection::new());
        trace!("Created selection on layer '{}'", self.name);
        self.listeners.emit(&SelectionEvent::Created);
    }

    fn delete_selection(&mut self) -> Option<TileSelection> {
        let removed = self.selection.take();
        if removed.is_some() {
            trace!("Deleted selection on layer '{}'", self.name);
            self.listeners.emit(&SelectionEvent::Deleted);
        }
        removed
    }

    fn restore_selection(&mut self, snapshot: TileSelection) {
        self.selection = Some(snapshot);
        self.listeners.emit(&SelectionEvent::Restored);
    }

    fn float_selection(&mut self) {
        self.with_selection(SelectionEvent::Floated, |s| s.float());
    }

    fn defloat_selection(&mut self) {
        self.with_selection(SelectionEvent::Defloated, |s| s.defloat());
    }

    fn add_tiles_to_selection(&mut self, coords: &[TileCoord]) {
        let grid = &self.grid;
        if let Some(selection) = self.selection.as_mut() {
            selection.add_tiles(coords.iter().copied(), grid);
            self.listeners.emit(&SelectionEvent::Modified);
        }
    }

    fn remove_tiles_from_selection(&mut self, coords: &[TileCoord]) -> Vec<(TileCoord, TileStack)> {
        let mut removed = Vec::new();
        self.with_selection(SelectionEvent::Modified, |s| {
            removed = s.remove_tiles(coords.iter().copied());
        });
        removed
    }

    fn insert_selection_entries(&mut self, entries: Vec<(TileCoord, TileStack)>) {
        self.with_selection(SelectionEvent::Modified, |s| s.insert_entries(entries));
    }

    fn set_selection_offset(&mut self, offset: TileCoord) {
        let Some(old) = self.selection.as_ref().map(|s| s.offset()) else {
            return;
        };
        self.with_selection(SelectionEvent::Moved { old, new: offset }, |s| {
            s.set_offset(offset)
        });
    }
}

impl NamedResource for MultiTileLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Collection hook that only admits layers matching the map's dimensions
#[derive(Debug, Clone, Copy)]
pub struct LayerSizeHook {
    pub width: u32,
    pub height: u32,
}

impl CollectionHooks<MultiTileLayer> for LayerSizeHook {
    fn check_add(&self, layer: &MultiTileLayer) -> bool {
        layer.grid.width() == self.width && layer.grid.height() == self.height
    }
}
