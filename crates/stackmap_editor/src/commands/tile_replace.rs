//! Batched per-cell grid edits applied and reverted as one unit

use stackmap_core::{GridAccess, Tile, TileCoord, TileStack};
use std::collections::BTreeMap;
use tracing::trace;

use super::command::Command;

/// What to do with one cell
#[derive(Debug, Clone, PartialEq)]
enum CellEdit {
    /// Replace the whole stack; `None` removes the cell's entry
    Replace(Option<TileStack>),
    /// Push these tiles on top of whatever the cell holds at execute time
    Add(Vec<Tile>),
}

/// Command for batch tile changes (painting strokes, fills, floating
/// selections, etc.)
///
/// Edits are queued per cell before the command runs. `execute` captures the
/// prior stack of every queued cell then applies the new contents; `undo`
/// puts every captured stack back. Queued cells outside the grid bounds are
/// skipped.
#[derive(Debug, Clone)]
pub struct TileReplace2DCommand {
    queued: BTreeMap<TileCoord, CellEdit>,
    /// Changes: coord -> stack before execute (`None` = no entry)
    captured: BTreeMap<TileCoord, Option<TileStack>>,
    description: String,
}

impl TileReplace2DCommand {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            queued: BTreeMap::new(),
            captured: BTreeMap::new(),
            description: description.into(),
        }
    }

    /// Queue replacing the cell's stack. Overrides anything queued earlier
    /// for the same cell.
    pub fn queue_replace(&mut self, coord: TileCoord, stack: Option<TileStack>) {
        self.queued.insert(coord, CellEdit::Replace(stack));
    }

    /// Queue adding `tile` on top of the cell's stack
    pub fn queue_add(&mut self, coord: TileCoord, tile: Tile) {
        match self.queued.get_mut(&coord) {
            Some(CellEdit::Replace(Some(stack))) => stack.add(tile),
            Some(CellEdit::Replace(None)) => {
                self.queued
                    .insert(coord, CellEdit::Replace(Some(TileStack::from_tiles([tile]))));
            }
            Some(CellEdit::Add(tiles)) => tiles.push(tile),
            None => {
                self.queued.insert(coord, CellEdit::Add(vec![tile]));
            }
        }
    }

    /// Queue adding every tile of `stack` on top of the cell's stack
    pub fn queue_merge(&mut self, coord: TileCoord, stack: &TileStack) {
        for tile in stack {
            self.queue_add(coord, tile.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Queued cells, row-major
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.queued.keys().copied()
    }
}

impl<L: GridAccess + ?Sized> Command<L> for TileReplace2DCommand {
    fn execute(&mut self, target: &mut L) {
        let grid = target.grid_mut();
        self.captured.clear();
        for (&coord, edit) in &self.queued {
            if !grid.in_bounds(coord) {
                trace!("Skipping out-of-bounds cell {}", coord);
                continue;
            }
            let before = grid.stack(coord).cloned();
            let after = match edit {
                CellEdit::Replace(stack) => stack.clone(),
                CellEdit::Add(tiles) => {
                    let mut stack = before.clone().unwrap_or_default();
                    for tile in tiles {
                        stack.add(tile.clone());
                    }
                    Some(stack)
                }
            };
            trace!("Cell {}: {:?} -> {:?}", coord, before, after);
            self.captured.insert(coord, before);
            grid.set_stack(coord, after);
        }
    }

    fn undo(&mut self, target: &mut L) {
        let grid = target.grid_mut();
        for (&coord, before) in &self.captured {
            grid.set_stack(coord, before.clone());
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use stackmap_core::TileGrid;

    #[test]
    fn test_replace_and_undo_restores_exactly() {
        let (mut grid, tiles) = grid_and_tiles(3);
        let a = TileCoord::new(0, 0);
        let b = TileCoord::new(1, 0);
        grid.add_tile(a, tiles[0].clone());
        grid.set_stack(b, Some(TileStack::new()));
        let before = grid_snapshot(&grid);

        let mut cmd = TileReplace2DCommand::new("Paint");
        cmd.queue_replace(a, Some(TileStack::from_tiles([tiles[1].clone()])));
        cmd.queue_replace(b, None);
        cmd.queue_replace(TileCoord::new(2, 2), Some(TileStack::from_tiles([tiles[2].clone()])));
        cmd.execute(&mut grid);

        assert_eq!(grid.stack(a).unwrap().tiles(), &[tiles[1].clone()]);
        assert!(grid.stack(b).is_none());
        assert!(grid.stack(TileCoord::new(2, 2)).is_some());

        cmd.undo(&mut grid);
        assert_eq!(grid_snapshot(&grid), before);
        // An empty stack comes back as an empty stack, not as a missing cell
        assert_eq!(grid.stack(b), Some(&TileStack::new()));
    }

    #[test]
    fn test_add_stacks_on_existing_content() {
        let (mut grid, tiles) = grid_and_tiles(3);
        let c = TileCoord::new(3, 3);
        grid.add_tile(c, tiles[0].clone());

        let mut cmd = TileReplace2DCommand::new("Stamp");
        cmd.queue_add(c, tiles[1].clone());
        cmd.queue_add(c, tiles[2].clone());
        cmd.execute(&mut grid);

        assert_eq!(
            grid.stack(c).unwrap().tiles(),
            &[tiles[0].clone(), tiles[1].clone(), tiles[2].clone()]
        );
        cmd.undo(&mut grid);
        assert_eq!(grid.stack(c).unwrap().tiles(), &[tiles[0].clone()]);
    }

    #[test]
    fn test_add_after_replace_builds_on_replacement() {
        let (mut grid, tiles) = grid_and_tiles(2);
        let c = TileCoord::new(0, 0);
        grid.add_tile(c, tiles[0].clone());

        let mut cmd = TileReplace2DCommand::new("Mixed");
        cmd.queue_replace(c, None);
        cmd.queue_add(c, tiles[1].clone());
        cmd.execute(&mut grid);

        assert_eq!(grid.stack(c).unwrap().tiles(), &[tiles[1].clone()]);
    }

    #[test]
    fn test_out_of_bounds_cells_are_skipped() {
        let (mut grid, tiles) = grid_and_tiles(1);
        let mut cmd = TileReplace2DCommand::new("Paint");
        cmd.queue_add(TileCoord::new(-1, 0), tiles[0].clone());
        cmd.queue_add(TileCoord::new(8, 8), tiles[0].clone());

        cmd.execute(&mut grid);
        assert_eq!(grid.entry_count(), 0);
        cmd.undo(&mut grid);
        assert_eq!(grid.entry_count(), 0);
    }

    #[test]
    fn test_redo_matches_execute() {
        let (mut grid, tiles) = grid_and_tiles(2);
        grid.add_tile(TileCoord::new(1, 1), tiles[0].clone());
        let mut cmd = TileReplace2DCommand::new("Paint");
        cmd.queue_add(TileCoord::new(1, 1), tiles[1].clone());
        cmd.queue_replace(TileCoord::new(2, 1), Some(TileStack::from_tiles([tiles[0].clone()])));

        Command::<TileGrid>::execute(&mut cmd, &mut grid);
        let after = grid_snapshot(&grid);
        Command::<TileGrid>::undo(&mut cmd, &mut grid);
        Command::<TileGrid>::redo(&mut cmd, &mut grid);

        assert_eq!(grid_snapshot(&grid), after);
    }
}
