//! Undo/redo command system

mod command;
mod selection;
mod tile_replace;

pub use command::{Command, CommandHistory, HistoryChanged};
pub use selection::{
    CreateTileSelectionCommand, DefloatTileSelectionCommand, DeleteTileSelectionCommand,
    FloatTileSelectionCommand, ModifyAddTileSelectionCommand, ModifyRemoveTileSelectionCommand,
    MoveTileSelectionCommand,
};
pub use tile_replace::TileReplace2DCommand;
