//! Undoable selection commands
//!
//! Each command is written against [`SelectionLayer`] only. Commands that
//! need an existing selection do nothing (and log a warning) without one.

use stackmap_core::{SelectionLayer, TileCoord, TileSelection, TileStack};
use std::collections::BTreeSet;
use tracing::warn;

use super::command::Command;
use super::tile_replace::TileReplace2DCommand;

/// Lift the selection's content out of the grid
#[derive(Debug, Default)]
pub struct FloatTileSelectionCommand {
    replace: Option<TileReplace2DCommand>,
    was_floating: bool,
}

impl FloatTileSelectionCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: SelectionLayer + ?Sized> Command<L> for FloatTileSelectionCommand {
    fn execute(&mut self, layer: &mut L) {
        let Some(selection) = layer.selection() else {
            warn!("Float requested without a selection");
            return;
        };
        self.was_floating = selection.is_floating();
        let mut replace = TileReplace2DCommand::new("Float Selection");
        let offset = selection.offset();
        for coord in selection.coords() {
            replace.queue_replace(coord + offset, None);
        }
        replace.execute(layer);
        layer.float_selection();
        self.replace = Some(replace);
    }

    fn undo(&mut self, layer: &mut L) {
        if let Some(replace) = self.replace.as_mut() {
            replace.undo(layer);
            if !self.was_floating {
                layer.defloat_selection();
            }
        }
    }

    fn description(&self) -> &str {
        "Float Selection"
    }
}

/// Write the selection's content back into the grid at its offset
#[derive(Debug, Default)]
pub struct DefloatTileSelectionCommand {
    replace: Option<TileReplace2DCommand>,
    was_floating: bool,
}

impl DefloatTileSelectionCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: SelectionLayer + ?Sized> Command<L> for DefloatTileSelectionCommand {
    fn execute(&mut self, layer: &mut L) {
        let Some(selection) = layer.selection() else {
            warn!("Defloat requested without a selection");
            return;
        };
        self.was_floating = selection.is_floating();
        let mut replace = TileReplace2DCommand::new("Defloat Selection");
        let offset = selection.offset();
        for (coord, stack) in selection.iter() {
            if !stack.is_empty() {
                replace.queue_merge(coord + offset, stack);
            }
        }
        replace.execute(layer);
        layer.defloat_selection();
        self.replace = Some(replace);
    }

    fn undo(&mut self, layer: &mut L) {
        if let Some(replace) = self.replace.as_mut() {
            replace.undo(layer);
            if self.was_floating {
                layer.float_selection();
            }
        }
    }

    fn description(&self) -> &str {
        "Defloat Selection"
    }
}

/// Start a new, empty selection
#[derive(Debug, Default)]
pub struct CreateTileSelectionCommand {
    /// Selection replaced by this one, if any
    replaced: Option<TileSelection>,
}

impl CreateTileSelectionCommand {
    pub fn new() -> Self {
        Self { replaced: None }
    }
}

impl<L: SelectionLayer + ?Sized> Command<L> for CreateTileSelectionCommand {
    fn execute(&mut self, layer: &mut L) {
        self.replaced = layer.selection().cloned();
        layer.create_selection();
    }

    fn undo(&mut self, layer: &mut L) {
        layer.delete_selection();
        if let Some(previous) = self.replaced.clone() {
            layer.restore_selection(previous);
        }
    }

    fn description(&self) -> &str {
        "Create Selection"
    }
}

/// Remove the selection, keeping a snapshot so undo can bring it back
#[derive(Debug, Default)]
pub struct DeleteTileSelectionCommand {
    snapshot: Option<TileSelection>,
}

impl DeleteTileSelectionCommand {
    pub fn new() -> Self {
        Self { snapshot: None }
    }
}

impl<L: SelectionLayer + ?Sized> Command<L> for DeleteTileSelectionCommand {
    fn execute(&mut self, layer: &mut L) {
        self.snapshot = layer.delete_selection();
    }

    fn undo(&mut self, layer: &mut L) {
        if let Some(snapshot) = self.snapshot.clone() {
            layer.restore_selection(snapshot);
        }
    }

    fn description(&self) -> &str {
        "Delete Selection"
    }
}

/// Add cells to the selection.
///
/// Only cells the selection does not already hold are recorded, so undo
/// removes exactly what this command added.
#[derive(Debug)]
pub struct ModifyAddTileSelectionCommand {
    requested: Vec<TileCoord>,
    /// Entries this command added, with the stacks they captured
    added: Vec<(TileCoord, TileStack)>,
}

impl ModifyAddTileSelectionCommand {
    pub fn new(coords: impl IntoIterator<Item = TileCoord>) -> Self {
        Self {
            requested: coords.into_iter().collect(),
            added: Vec::new(),
        }
    }

    /// Cells actually added by the last execute
    pub fn added(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.added.iter().map(|(coord, _)| *coord)
    }
}

impl<L: SelectionLayer + ?Sized> Command<L> for ModifyAddTileSelectionCommand {
    fn execute(&mut self, layer: &mut L) {
        let Some(selection) = layer.selection() else {
            warn!("Add to selection requested without a selection");
            return;
        };
        let diff: Vec<TileCoord> = self
            .requested
            .iter()
            .copied()
            .filter(|coord| !selection.contains(*coord))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        layer.add_tiles_to_selection(&diff);
        self.added = match layer.selection() {
            Some(selection) => diff
                .into_iter()
                .filter_map(|coord| selection.stack(coord).map(|s| (coord, s.clone())))
                .collect(),
            None => Vec::new(),
        };
    }

    fn undo(&mut self, layer: &mut L) {
        let coords: Vec<TileCoord> = self.added().collect();
        layer.remove_tiles_from_selection(&coords);
    }

    fn redo(&mut self, layer: &mut L) {
        layer.insert_selection_entries(self.added.clone());
    }

    fn description(&self) -> &str {
        "Add to Selection"
    }
}

/// Remove cells from the selection.
///
/// Only cells the selection holds are removed; undo puts their original
/// snapshots back.
#[derive(Debug)]
pub struct ModifyRemoveTileSelectionCommand {
    requested: Vec<TileCoord>,
    removed: Vec<(TileCoord, TileStack)>,
}

impl ModifyRemoveTileSelectionCommand {
    pub fn new(coords: impl IntoIterator<Item = TileCoord>) -> Self {
        Self {
            requested: coords.into_iter().collect(),
            removed: Vec::new(),
        }
    }

    pub fn removed(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.removed.iter().map(|(coord, _)| *coord)
    }
}

impl<L: SelectionLayer + ?Sized> Command<L> for ModifyRemoveTileSelectionCommand {
    fn execute(&mut self, layer: &mut L) {
        let Some(selection) = layer.selection() else {
            warn!("Remove from selection requested without a selection");
            return;
        };
        let diff: Vec<TileCoord> = self
            .requested
            .iter()
            .copied()
            .filter(|coord| selection.contains(*coord))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        self.removed = layer.remove_tiles_from_selection(&diff);
    }

    fn undo(&mut self, layer: &mut L) {
        layer.insert_selection_entries(self.removed.clone());
    }

    fn description(&self) -> &str {
        "Remove from Selection"
    }
}

/// Change the selection's offset. Stack contents are not touched.
#[derive(Debug)]
pub struct MoveTileSelectionCommand {
    previous: Option<TileCoord>,
    offset: TileCoord,
}

impl MoveTileSelectionCommand {
    pub fn new(offset: TileCoord) -> Self {
        Self {
            previous: None,
            offset,
        }
    }

    /// Offset captured before the last execute
    pub fn previous_offset(&self) -> Option<TileCoord> {
        self.previous
    }
}

impl<L: SelectionLayer + ?Sized> Command<L> for MoveTileSelectionCommand {
    fn execute(&mut self, layer: &mut L) {
        let Some(selection) = layer.selection() else {
            warn!("Move requested without a selection");
            return;
        };
        self.previous = Some(selection.offset());
        layer.set_selection_offset(self.offset);
    }

    fn undo(&mut self, layer: &mut L) {
        if let Some(previous) = self.previous {
            layer.set_selection_offset(previous);
        }
    }

    fn description(&self) -> &str {
        "Move Selection"
    }
}
