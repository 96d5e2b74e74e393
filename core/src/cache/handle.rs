// storefront_sync/src/cache/handle.rs
use crate::cache::collection::CollectionCache;
use crate::model::Resource;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::{Arc, Weak};

/// Shared, observable handle to one kind's collection cache.
///
/// Views hold a `Collection<R>`; controllers only hold a [`WeakCollection`], so once every
/// view has dropped its handle, late remote results are discarded instead of applied.
///
/// IMPORTANT: Lock guards obtained from this struct are blocking and MUST NOT
/// be held across `.await` suspension points in asynchronous code.
#[derive(Debug)]
pub struct Collection<R: Resource>(Arc<RwLock<CollectionCache<R>>>);

impl<R: Resource> Collection<R> {
  pub fn new() -> Self {
    Collection(Arc::new(RwLock::new(CollectionCache::new())))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, CollectionCache<R>> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, CollectionCache<R>> {
    self.0.write()
  }

  // Example: collection.map_read(|cache| cache.items())
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&CollectionCache<R>) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// Clone of the current entities.
  pub fn snapshot(&self) -> Vec<R> {
    self.read().snapshot()
  }

  pub fn len(&self) -> usize {
    self.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.read().is_empty()
  }

  pub fn downgrade(&self) -> WeakCollection<R> {
    WeakCollection(Arc::downgrade(&self.0))
  }

  /// Number of live strong handles (observers).
  pub fn observers(&self) -> usize {
    Arc::strong_count(&self.0)
  }
}

impl<R: Resource> Clone for Collection<R> {
  fn clone(&self) -> Self {
    Collection(Arc::clone(&self.0))
  }
}

impl<R: Resource> Default for Collection<R> {
  fn default() -> Self {
    Self::new()
  }
}

/// Non-owning reference held by controllers.
#[derive(Debug)]
pub struct WeakCollection<R: Resource>(Weak<RwLock<CollectionCache<R>>>);

impl<R: Resource> WeakCollection<R> {
  pub fn upgrade(&self) -> Option<Collection<R>> {
    self.0.upgrade().map(Collection)
  }
}

impl<R: Resource> Clone for WeakCollection<R> {
  fn clone(&self) -> Self {
    WeakCollection(Weak::clone(&self.0))
  }
}
