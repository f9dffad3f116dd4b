//! Shared tile references and the pools that own their definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

use crate::listeners::{ListenerId, Listeners};
use crate::named::{NamedResource, NamedResourceCollection};

/// Definition of a single tile: identity plus what is needed to draw it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileDefinition {
    pub id: Uuid,
    /// Name of the pool this tile belongs to
    pub pool: String,
    /// Index of the tile's image within the pool's source atlas
    pub source_index: u32,
    /// Custom user-defined properties
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, serde_json::Value>,
}

/// Reference to a tile definition.
///
/// Cloning shares the definition. Equality and hashing follow the
/// definition's id, so two references are equal iff they name the same tile.
#[derive(Clone)]
pub struct Tile(Arc<TileDefinition>);

impl Tile {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn definition(&self) -> &TileDefinition {
        &self.0
    }

    pub fn pool(&self) -> &str {
        &self.0.pool
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.properties.get(key)
    }
}

impl From<TileDefinition> for Tile {
    fn from(definition: TileDefinition) -> Self {
        Tile(Arc::new(definition))
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}:{})", self.0.pool, self.0.source_index)
    }
}

/// Provider of tile references by identity
pub trait TileSource {
    fn tile(&self, id: Uuid) -> Option<Tile>;
}

/// Notifications raised by a [`TilePool`]
#[derive(Debug, Clone, PartialEq)]
pub enum PoolEvent {
    TileAdded(Uuid),
    TileRemoved(Uuid),
}

/// A named set of tile definitions (one tileset image, typically)
#[derive(Debug, Clone)]
pub struct TilePool {
    name: String,
    /// Tile size in pixels
    pub tile_width: u32,
    pub tile_height: u32,
    tiles: Vec<Tile>,
    by_id: HashMap<Uuid, usize>,
    listeners: Listeners<PoolEvent>,
}

impl TilePool {
    pub fn new(name: impl Into<String>, tile_width: u32, tile_height: u32) -> Self {
        Self {
            name: name.into(),
            tile_width,
            tile_height,
            tiles: Vec::new(),
            by_id: HashMap::new(),
            listeners: Listeners::new(),
        }
    }

    /// Define a new tile for the given atlas index and hand out its reference
    pub fn add_tile(&mut self, source_index: u32) -> Tile {
        self.add_tile_with_properties(source_index, HashMap::new())
    }

    pub fn add_tile_with_properties(
        &mut self,
        source_index: u32,
        properties: HashMap<String, serde_json::Value>,
    ) -> Tile {
        let tile = Tile::from(TileDefinition {
            id: Uuid::new_v4(),
            pool: self.name.clone(),
            source_index,
            properties,
        });
        self.by_id.insert(tile.id(), self.tiles.len());
        self.tiles.push(tile.clone());
        self.listeners.emit(&PoolEvent::TileAdded(tile.id()));
        tile
    }

    /// Drop the pool's definition. References already held elsewhere stay valid.
    pub fn remove_tile(&mut self, id: Uuid) -> Option<Tile> {
        let idx = self.by_id.remove(&id)?;
        let tile = self.tiles.remove(idx);
        for slot in self.by_id.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        self.listeners.emit(&PoolEvent::TileRemoved(id));
        Some(tile)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&PoolEvent) + Send + Sync + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl TileSource for TilePool {
    fn tile(&self, id: Uuid) -> Option<Tile> {
        self.by_id.get(&id).map(|&idx| self.tiles[idx].clone())
    }
}

impl NamedResource for TilePool {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl TileSource for NamedResourceCollection<TilePool> {
    fn tile(&self, id: Uuid) -> Option<Tile> {
        self.iter().find_map(|pool| pool.tile(id))
    }
}
