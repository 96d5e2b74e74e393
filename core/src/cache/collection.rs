// storefront_sync/src/cache/collection.rs

//! Ordered in-memory mirror of one remote collection.

use crate::model::{EntityId, Resource};
use std::collections::HashSet;
use tracing::{event, Level};

/// Entities of one kind in server order, unique by id, plus an optional selection.
///
/// Entities without an id never enter the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionCache<R: Resource> {
  items: Vec<R>,
  selected: Option<EntityId>,
}

impl<R: Resource> Default for CollectionCache<R> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      selected: None,
    }
  }
}

impl<R: Resource> CollectionCache<R> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn items(&self) -> &[R] {
    &self.items
  }

  pub fn iter(&self) -> std::slice::Iter<'_, R> {
    self.items.iter()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn position(&self, id: &EntityId) -> Option<usize> {
    self.items.iter().position(|item| item.id() == Some(id))
  }

  pub fn get(&self, id: &EntityId) -> Option<&R> {
    self.items.iter().find(|item| item.id() == Some(id))
  }

  pub fn contains(&self, id: &EntityId) -> bool {
    self.position(id).is_some()
  }

  /// Replaces the whole collection with a server listing. Entries without an id and
  /// repeated ids (after the first) are dropped. Returns the number kept.
  pub fn replace_all(&mut self, items: Vec<R>) -> usize {
    let mut seen = HashSet::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
      match item.id() {
        Some(id) if seen.insert(id.clone()) => kept.push(item),
        Some(id) => {
          event!(Level::WARN, kind = %R::KIND, id = %id, "Listing contained a duplicate id; keeping the first.")
        }
        None => event!(Level::WARN, kind = %R::KIND, "Listing contained an entity without an id; dropped."),
      }
    }
    self.items = kept;
    if let Some(selected) = &self.selected {
      if !self.contains(selected) {
        self.selected = None;
      }
    }
    self.items.len()
  }

  /// Appends a created entity. If its id is already cached the row is replaced in place.
  /// Returns `false` when the entity has no id.
  pub fn append(&mut self, entity: R) -> bool {
    let Some(id) = entity.id().cloned() else {
      return false;
    };
    match self.position(&id) {
      Some(index) => self.items[index] = entity,
      None => self.items.push(entity),
    }
    true
  }

  /// Replaces the row with `id` wholesale and returns the previous entity, or `None`
  /// when no row matches (the cache is left untouched).
  pub fn replace(&mut self, id: &EntityId, entity: R) -> Option<R> {
    let index = self.position(id)?;
    Some(std::mem::replace(&mut self.items[index], entity))
  }

  /// Removes the row with `id`, returning its former position and value.
  pub fn remove(&mut self, id: &EntityId) -> Option<(usize, R)> {
    let index = self.position(id)?;
    let removed = self.items.remove(index);
    if self.selected.as_ref() == Some(id) {
      self.selected = None;
    }
    Some((index, removed))
  }

  /// Puts an entity back at a former position (clamped to the current length).
  pub fn restore(&mut self, index: usize, entity: R) {
    if let Some(id) = entity.id() {
      if self.contains(id) {
        return;
      }
    } else {
      return;
    }
    let index = index.min(self.items.len());
    self.items.insert(index, entity);
  }

  pub fn clear(&mut self) {
    self.items.clear();
    self.selected = None;
  }

  /// Marks a cached entity as selected. Returns `false` if the id is not cached.
  pub fn select(&mut self, id: &EntityId) -> bool {
    if self.contains(id) {
      self.selected = Some(id.clone());
      true
    } else {
      false
    }
  }

  /// The selected entity, as currently cached.
  pub fn selected(&self) -> Option<&R> {
    self.selected.as_ref().and_then(|id| self.get(id))
  }

  pub fn snapshot(&self) -> Vec<R> {
    self.items.clone()
  }
}
