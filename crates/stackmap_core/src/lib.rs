//! Core data structures for stackmap
//!
//! This crate provides the in-memory model of a multi-tile map layer:
//! - `TileCoord` / `TileRect` - Cell addresses and rectangular regions
//! - `Tile` / `TilePool` - Shared tile references and the pool that hands them out
//! - `TileStack` - Bottom-to-top tile references occupying one cell
//! - `TileGrid` - Sparse, bounded grid of tile stacks with region queries
//! - `NamedResourceCollection` - Uniquely-named registry with a safe rename protocol
//! - `TileSelection` - Floating/anchored overlay of stack snapshots
//! - `MultiTileLayer` - A named layer combining a grid and its selection
//! - `TileUsageIndex` - Lazily rebuilt tile -> cell index
//!
//! Every notifying type exposes `subscribe`/`unsubscribe` backed by [`Listeners`].

mod coord;
mod grid;
mod layer;
mod listeners;
mod named;
mod selection;
mod stack;
mod tile;
mod usage;

pub use coord::{TileCoord, TileRect};
pub use grid::{GridAccess, GridEvent, GridSize, TileGrid};
pub use layer::{LayerSizeHook, MultiTileLayer, SelectionEvent, SelectionLayer};
pub use listeners::{ListenerId, Listeners};
pub use named::{
    CollectionError, CollectionEvent, CollectionHooks, NamedResource, NamedResourceCollection,
    NoHooks, RenameRejected, RenameRequest, ResourceMut,
};
pub use selection::TileSelection;
pub use stack::{StackError, StackEvent, TileStack};
pub use tile::{PoolEvent, Tile, TileDefinition, TilePool, TileSource};
pub use usage::TileUsageIndex;
