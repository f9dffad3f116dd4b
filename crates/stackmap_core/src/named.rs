//! Uniquely-named resource registry
//!
//! Items are looked up by name in O(1) and iterated in insertion order.
//! Renames go through the collection so the name index never drifts from
//! the items' own names.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut, Index};
use thiserror::Error;
use tracing::warn;

use crate::listeners::{ListenerId, Listeners};

/// An item with a unique name
pub trait NamedResource {
    fn name(&self) -> &str;
    /// Collections observe names changed through [`ResourceMut`] and re-key
    /// or revert them; a free-standing item can be renamed at will.
    fn set_name(&mut self, name: String);
}

/// Failures of lookups and the unconditional rename path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("No resource named '{0}'")]
    NotFound(String),
    #[error("A resource named '{0}' already exists")]
    NameTaken(String),
}

/// Why a [`NamedResourceCollection::try_rename`] did not happen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameRejected {
    #[error("No resource named '{0}'")]
    UnknownName(String),
    #[error("A resource named '{0}' already exists")]
    NameTaken(String),
    #[error("Renaming '{old}' to '{new}' was cancelled")]
    Vetoed { old: String, new: String },
}

/// Pre-commit notification of a rename; any listener may cancel it
#[derive(Debug)]
pub struct RenameRequest {
    pub old_name: String,
    pub new_name: String,
    cancelled: Cell<bool>,
}

impl RenameRequest {
    fn new(old_name: &str, new_name: &str) -> Self {
        Self {
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            cancelled: Cell::new(false),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionEvent {
    Added(String),
    Removed(String),
    Renamed { old: String, new: String },
}

/// Extension points a collection calls around membership changes.
///
/// `check_add` runs before the duplicate-name check commits an insert;
/// returning `false` rejects the item the same way a duplicate name does.
pub trait CollectionHooks<T>: Send + Sync {
    fn check_add(&self, _item: &T) -> bool {
        true
    }

    fn added(&self, _item: &T) {}

    fn removed(&self, _item: &T) {}
}

/// Hooks that accept everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl<T> CollectionHooks<T> for NoHooks {}

pub struct NamedResourceCollection<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
    hooks: Box<dyn CollectionHooks<T>>,
    renaming: Listeners<RenameRequest>,
    listeners: Listeners<CollectionEvent>,
}

impl<T: NamedResource> NamedResourceCollection<T> {
    pub fn new() -> Self {
        Self::with_hooks(NoHooks)
    }

    pub fn with_hooks(hooks: impl CollectionHooks<T> + 'static) -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            hooks: Box::new(hooks),
            renaming: Listeners::new(),
            listeners: Listeners::new(),
        }
    }

    /// Insert `item`, or hand it back untouched if its name is taken or the
    /// hooks reject it.
    pub fn add(&mut self, item: T) -> Result<(), T> {
        if self.index.contains_key(item.name()) || !self.hooks.check_add(&item) {
            return Err(item);
        }
        let name = item.name().to_string();
        self.index.insert(name.clone(), self.items.len());
        self.items.push(item);
        self.hooks.added(&self.items[self.items.len() - 1]);
        self.listeners.emit(&CollectionEvent::Added(name));
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        let pos = self.index.remove(name)?;
        let item = self.items.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        self.hooks.removed(&item);
        self.listeners.emit(&CollectionEvent::Removed(name.to_string()));
        Some(item)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&pos| &self.items[pos])
    }

    /// Mutable access through a guard. A name changed via the guard is
    /// committed with [`try_rename`](Self::try_rename) when the guard drops,
    /// and reverted if that rename is rejected.
    pub fn get_mut(&mut self, name: &str) -> Option<ResourceMut<'_, T>> {
        let pos = *self.index.get(name)?;
        Some(ResourceMut {
            name: name.to_string(),
            collection: self,
            pos,
        })
    }

    pub fn try_get(&self, name: &str) -> Result<&T, CollectionError> {
        self.get(name)
            .ok_or_else(|| CollectionError::NotFound(name.to_string()))
    }

    /// Two-phase rename: validate, let `renaming` listeners cancel, then
    /// commit the index change and raise [`CollectionEvent::Renamed`].
    /// Any rejection leaves the collection untouched.
    pub fn try_rename(&mut self, old: &str, new: &str) -> Result<(), RenameRejected> {
        let Some(&pos) = self.index.get(old) else {
            return Err(RenameRejected::UnknownName(old.to_string()));
        };
        if old == new {
            return Ok(());
        }
        if self.index.contains_key(new) {
            return Err(RenameRejected::NameTaken(new.to_string()));
        }

        let request = RenameRequest::new(old, new);
        self.renaming.emit(&request);
        if request.is_cancelled() {
            warn!("Rename of '{}' to '{}' was cancelled", old, new);
            return Err(RenameRejected::Vetoed {
                old: old.to_string(),
                new: new.to_string(),
            });
        }

        self.commit_rename(pos, old, new);
        Ok(())
    }

    /// Rename without consulting `renaming` listeners. The caller asserts the
    /// item exists; a missing item or a taken name is an error and nothing
    /// changes.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), CollectionError> {
        let Some(&pos) = self.index.get(old) else {
            return Err(CollectionError::NotFound(old.to_string()));
        };
        if old == new {
            return Ok(());
        }
        if self.index.contains_key(new) {
            return Err(CollectionError::NameTaken(new.to_string()));
        }
        self.commit_rename(pos, old, new);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.name())
    }

    pub fn subscribe(&mut self, listener: impl Fn(&CollectionEvent) + Send + Sync + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn subscribe_renaming(
        &mut self,
        listener: impl Fn(&RenameRequest) + Send + Sync + 'static,
    ) -> ListenerId {
        self.renaming.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn unsubscribe_renaming(&mut self, id: ListenerId) -> bool {
        self.renaming.unsubscribe(id)
    }

    fn commit_rename(&mut self, pos: usize, old: &str, new: &str) {
        self.index.remove(old);
        self.index.insert(new.to_string(), pos);
        self.items[pos].set_name(new.to_string());
        self.listeners.emit(&CollectionEvent::Renamed {
            old: old.to_string(),
            new: new.to_string(),
        });
    }
}

/// Mutable borrow of one collection item that keeps the name index in step
pub struct ResourceMut<'a, T: NamedResource> {
    collection: &'a mut NamedResourceCollection<T>,
    pos: usize,
    /// Name the item was indexed under when borrowed
    name: String,
}

impl<T: NamedResource> Deref for ResourceMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.collection.items[self.pos]
    }
}

impl<T: NamedResource> DerefMut for ResourceMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.collection.items[self.pos]
    }
}

impl<T: NamedResource> Drop for ResourceMut<'_, T> {
    fn drop(&mut self) {
        let item = &mut self.collection.items[self.pos];
        if item.name() == self.name {
            return;
        }
        let wanted = item.name().to_string();
        item.set_name(self.name.clone());
        if let Err(err) = self.collection.try_rename(&self.name, &wanted) {
            warn!("Reverted in-place rename of '{}': {}", self.name, err);
        }
    }
}

impl<T: NamedResource> Default for NamedResourceCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NamedResource> Index<&str> for NamedResourceCollection<T> {
    type Output = T;

    /// Panics when no item has this name; use `get`/`try_get` to check first.
    fn index(&self, name: &str) -> &T {
        match self.try_get(name) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, T: NamedResource> IntoIterator for &'a NamedResourceCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for NamedResourceCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedResourceCollection")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}
