// storefront_sync/src/registry.rs

//! Defines `AdminPanel`, a kind-keyed registry holding one controller and one observed
//! collection per resource kind, with list/save/remove dispatched by `ResourceKind`.

use crate::cache::Collection;
use crate::controller::{CollectionController, ConfirmationGate, RemoveOutcome, SaveMode};
use crate::endpoint::{EndpointResolver, ResourceKind};
use crate::error::{SyncError, SyncResult};
use crate::model::{EntityId, FashionFest, Product, Resource};
use crate::remote::RemoteStore;
use crate::session::Session;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// One table row: the entity id and its rendered cells.
pub type PanelRow = (EntityId, Vec<String>);

/// Type-erased capability set the panel needs from a controller.
#[async_trait]
trait AnyCollectionController: Send + Sync {
  async fn list(&self) -> SyncResult<usize>;

  /// Decodes `draft` into the concrete kind, saves it and re-encodes the server entity.
  async fn save_value(&self, draft: Value, mode: SaveMode, session: &Session) -> SyncResult<Value>;

  async fn remove(&self, id: &EntityId, gate: &dyn ConfirmationGate, session: &Session) -> SyncResult<RemoveOutcome>;

  fn columns(&self) -> &'static [&'static str];

  fn rows(&self) -> Vec<PanelRow>;

  fn as_any(&self) -> &dyn Any;
}

/// A registered kind. The panel owns the strong cache handle; the controller only
/// observes it.
struct PanelEntry<R: Resource> {
  controller: Arc<CollectionController<R>>,
  collection: Collection<R>,
}

#[async_trait]
impl<R: Resource> AnyCollectionController for PanelEntry<R> {
  async fn list(&self) -> SyncResult<usize> {
    self.controller.list().await
  }

  #[instrument(
    name = "PanelEntry::save_value",
    skip_all,
    fields(kind = %R::KIND, mode = ?mode),
    err(Display)
  )]
  async fn save_value(&self, draft: Value, mode: SaveMode, session: &Session) -> SyncResult<Value> {
    event!(Level::TRACE, "Decoding draft for the registered kind.");
    let draft: R = serde_json::from_value(draft).map_err(|e| SyncError::Validation {
      message: format!("Could not read the {} form: {}", R::KIND.singular(), e),
      fields: Vec::new(),
    })?;
    let saved = self.controller.save(&draft, mode, session).await?;
    serde_json::to_value(&saved).map_err(|e| SyncError::Server {
      status: 200,
      message: Some(format!("Could not encode the saved {}: {}", R::KIND.singular(), e)),
    })
  }

  async fn remove(&self, id: &EntityId, gate: &dyn ConfirmationGate, session: &Session) -> SyncResult<RemoveOutcome> {
    self.controller.remove(id, gate, session).await
  }

  fn columns(&self) -> &'static [&'static str] {
    R::columns()
  }

  fn rows(&self) -> Vec<PanelRow> {
    self
      .collection
      .read()
      .iter()
      .filter_map(|entity| entity.id().map(|id| (id.clone(), entity.table_row())))
      .collect()
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}

/// The back-office panel: one tab per registered kind, one active tab.
pub struct AdminPanel {
  entries: RwLock<BTreeMap<ResourceKind, Arc<dyn AnyCollectionController>>>,
  active: RwLock<ResourceKind>,
}

impl Default for AdminPanel {
  fn default() -> Self {
    Self::new()
  }
}

impl AdminPanel {
  /// Creates an empty panel. The active tab starts on products.
  pub fn new() -> Self {
    Self {
      entries: RwLock::new(BTreeMap::new()),
      active: RwLock::new(ResourceKind::Products),
    }
  }

  /// A panel with products and fashion fests registered against `remote`.
  pub fn with_defaults(resolver: &EndpointResolver, remote: Arc<dyn RemoteStore>) -> Self {
    let panel = Self::new();
    panel.register::<Product>(resolver, remote.clone());
    panel.register::<FashionFest>(resolver, remote);
    panel
  }

  /// Registers kind `R` with a fresh collection and a controller observing it.
  /// Re-registering a kind replaces its entry (and drops the old cache).
  pub fn register<R: Resource>(&self, resolver: &EndpointResolver, remote: Arc<dyn RemoteStore>) -> Collection<R> {
    let collection = Collection::<R>::new();
    let controller = CollectionController::new(resolver, remote, &collection);
    self.register_controller(controller, collection.clone());
    collection
  }

  /// Registers a prepared controller together with the collection it observes.
  pub fn register_controller<R: Resource>(&self, controller: CollectionController<R>, collection: Collection<R>) {
    event!(Level::DEBUG, kind = %R::KIND, "Registering collection controller.");
    let entry = PanelEntry {
      controller: Arc::new(controller),
      collection,
    };
    let previous = self.entries.write().insert(R::KIND, Arc::new(entry));
    if previous.is_some() {
      event!(Level::WARN, kind = %R::KIND, "Replaced an existing registration.");
    }
  }

  pub fn kinds(&self) -> Vec<ResourceKind> {
    self.entries.read().keys().copied().collect()
  }

  pub fn active_tab(&self) -> ResourceKind {
    *self.active.read()
  }

  fn entry(&self, kind: ResourceKind) -> SyncResult<Arc<dyn AnyCollectionController>> {
    self.entries.read().get(&kind).cloned().ok_or_else(|| {
      event!(Level::ERROR, kind = %kind, "No controller registered for kind.");
      SyncError::Configuration {
        token: kind.token().to_string(),
      }
    })
  }

  /// Runs `f` against the typed entry registered for `R`.
  fn with_typed<R: Resource, T>(&self, f: impl FnOnce(&PanelEntry<R>) -> T) -> SyncResult<T> {
    let entry = self.entry(R::KIND)?;
    match entry.as_any().downcast_ref::<PanelEntry<R>>() {
      Some(typed) => Ok(f(typed)),
      None => {
        event!(
          Level::ERROR,
          kind = %R::KIND,
          expected = %std::any::type_name::<R>(),
          "Registered entry has a different entity type."
        );
        Err(SyncError::Configuration {
          token: R::KIND.token().to_string(),
        })
      }
    }
  }

  /// The typed controller registered for `R`.
  pub fn controller<R: Resource>(&self) -> SyncResult<Arc<CollectionController<R>>> {
    self.with_typed(|entry: &PanelEntry<R>| entry.controller.clone())
  }

  /// The collection the panel renders for `R`.
  pub fn collection<R: Resource>(&self) -> SyncResult<Collection<R>> {
    self.with_typed(|entry: &PanelEntry<R>| entry.collection.clone())
  }

  /// Makes `kind` the active tab and refreshes it.
  #[instrument(name = "AdminPanel::switch_to", skip_all, fields(kind = %kind), err(Display))]
  pub async fn switch_to(&self, kind: ResourceKind) -> SyncResult<usize> {
    let entry = self.entry(kind)?;
    *self.active.write() = kind;
    entry.list().await
  }

  pub async fn list(&self, kind: ResourceKind) -> SyncResult<usize> {
    let entry = self.entry(kind)?;
    entry.list().await
  }

  /// Saves a JSON form payload as an entity of `kind`. Returns the server's entity.
  pub async fn save(&self, kind: ResourceKind, draft: Value, mode: SaveMode, session: &Session) -> SyncResult<Value> {
    let entry = self.entry(kind)?;
    entry.save_value(draft, mode, session).await
  }

  pub async fn remove(
    &self,
    kind: ResourceKind,
    id: &EntityId,
    gate: &dyn ConfirmationGate,
    session: &Session,
  ) -> SyncResult<RemoveOutcome> {
    let entry = self.entry(kind)?;
    entry.remove(id, gate, session).await
  }

  pub fn columns(&self, kind: ResourceKind) -> SyncResult<&'static [&'static str]> {
    Ok(self.entry(kind)?.columns())
  }

  pub fn rows(&self, kind: ResourceKind) -> SyncResult<Vec<PanelRow>> {
    Ok(self.entry(kind)?.rows())
  }
}
