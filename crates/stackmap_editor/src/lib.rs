//! stackmap_editor - Undoable editing on top of `stackmap_core`
//!
//! This crate provides:
//! - A generic command history with bounded depth and change notifications
//! - Batched, exactly reversible grid edits
//! - Selection commands (create, delete, float, defloat, modify, move)
//! - History settings loaded from TOML
//! - A static registry of layer presenters
//!
//! # Usage
//!
//! ```rust,ignore
//! use stackmap_core::{MultiTileLayer, TileCoord};
//! use stackmap_editor::commands::{
//!     CommandHistory, CreateTileSelectionCommand, ModifyAddTileSelectionCommand,
//! };
//!
//! let mut layer = MultiTileLayer::new("Ground", 32, 32, 16, 16);
//! let mut history = CommandHistory::<MultiTileLayer>::new();
//!
//! history.execute(Box::new(CreateTileSelectionCommand::new()), &mut layer);
//! history.execute(
//!     Box::new(ModifyAddTileSelectionCommand::new([TileCoord::new(0, 0)])),
//!     &mut layer,
//! );
//! history.undo(&mut layer);
//! ```

pub mod commands;
pub mod config;
pub mod registry;

pub use stackmap_core;

pub use commands::{Command, CommandHistory};
pub use config::{ConfigError, HistoryConfig};
pub use registry::{LayerKind, LayerPresenter, LayerPresenterRegistry};

#[cfg(test)]
mod testing;
