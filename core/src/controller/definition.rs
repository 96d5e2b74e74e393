// storefront_sync/src/controller/definition.rs

//! Contains the `CollectionController<R>` struct and the plumbing shared by its
//! operations: dispatch, in-flight tracking and guarded cache application.

use crate::cache::{Collection, CollectionCache, WeakCollection};
use crate::endpoint::{Endpoint, EndpointResolver, ResourceKind};
use crate::error::{SyncError, SyncResult};
use crate::model::{EntityId, MutationPolicy, Resource};
use crate::remote::{RemoteRequest, RemoteResponse, RemoteStore};
use crate::session::{BearerToken, Session};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{event, Level};

/// Drives one resource kind's remote collection and keeps its cache consistent.
///
/// The controller holds only a weak reference to the cache. Results that complete after
/// every observer dropped its [`Collection`] handle are discarded (the caller still gets
/// the result).
pub struct CollectionController<R: Resource> {
  pub(crate) endpoint: Endpoint,
  pub(crate) remote: Arc<dyn RemoteStore>,
  pub(crate) target: WeakCollection<R>,
  pub(crate) policy: MutationPolicy,
  in_flight: Mutex<HashSet<EntityId>>,
}

impl<R: Resource> CollectionController<R> {
  pub fn new(resolver: &EndpointResolver, remote: Arc<dyn RemoteStore>, collection: &Collection<R>) -> Self {
    let endpoint = resolver.resolve(R::KIND);
    event!(
      Level::DEBUG,
      kind = %R::KIND,
      url = endpoint.collection_url(),
      policy = ?R::POLICY,
      "Creating collection controller."
    );
    Self {
      endpoint,
      remote,
      target: collection.downgrade(),
      policy: R::POLICY,
      in_flight: Mutex::new(HashSet::new()),
    }
  }

  /// Overrides the kind's default mutation policy.
  pub fn with_policy(mut self, policy: MutationPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn kind(&self) -> ResourceKind {
    R::KIND
  }

  pub fn endpoint(&self) -> &Endpoint {
    &self.endpoint
  }

  pub fn policy(&self) -> MutationPolicy {
    self.policy
  }

  /// The observed collection, if any observer is still alive.
  pub fn collection(&self) -> Option<Collection<R>> {
    self.target.upgrade()
  }

  pub fn is_in_flight(&self, id: &EntityId) -> bool {
    self.in_flight.lock().contains(id)
  }

  /// Claims `id` for one mutation. The claim is released when the guard drops.
  pub(crate) fn begin_mutation(&self, id: &EntityId) -> SyncResult<InFlightGuard<'_>> {
    let mut in_flight = self.in_flight.lock();
    if !in_flight.insert(id.clone()) {
      event!(Level::WARN, kind = %R::KIND, id = %id, "Rejected concurrent mutation on the same entity.");
      return Err(SyncError::MutationInFlight { id: id.clone() });
    }
    Ok(InFlightGuard {
      set: &self.in_flight,
      id: id.clone(),
    })
  }

  /// Bearer token for a write: mandatory for kinds whose writes require auth, attached
  /// opportunistically otherwise.
  pub(crate) fn write_credential(&self, session: &Session) -> SyncResult<Option<BearerToken>> {
    if R::WRITE_REQUIRES_AUTH {
      let action = format!("create or edit a {}", R::KIND.singular());
      session.require_token(&action).map(Some)
    } else {
      Ok(session.token())
    }
  }

  /// Rejects a server entity that does not carry the id it was requested under.
  pub(crate) fn confirm_identity(&self, id: &EntityId, entity: R) -> SyncResult<R> {
    if entity.id() == Some(id) {
      return Ok(entity);
    }
    event!(
      Level::WARN,
      kind = %R::KIND,
      requested = %id,
      returned = ?entity.id(),
      "Server returned a different entity."
    );
    Err(SyncError::Server {
      status: 200,
      message: Some(format!("The server returned a different {} than the one requested.", R::KIND.singular())),
    })
  }

  /// Sends one request and converts any failure at this boundary.
  pub(crate) async fn dispatch(&self, request: RemoteRequest) -> SyncResult<RemoteResponse> {
    let method = request.method;
    let url = request.url.clone();
    event!(Level::DEBUG, %method, %url, "Dispatching remote request.");
    match self.remote.send(request).await {
      Ok(response) => {
        event!(Level::TRACE, %method, %url, status = response.status, "Remote request succeeded.");
        Ok(response)
      }
      Err(failure) => {
        let error = SyncError::from(failure);
        event!(Level::WARN, %method, %url, error = %error, "Remote request failed.");
        Err(error)
      }
    }
  }

  /// Applies `f` to the cache if it is still observed; otherwise logs and returns `None`.
  pub(crate) fn apply<T>(&self, operation: &str, f: impl FnOnce(&mut CollectionCache<R>) -> T) -> Option<T> {
    match self.target.upgrade() {
      Some(collection) => {
        let mut cache = collection.write();
        Some(f(&mut cache))
      }
      None => {
        event!(
          Level::DEBUG,
          kind = %R::KIND,
          operation,
          "Collection has no observers; discarding result."
        );
        None
      }
    }
  }
}

pub(crate) struct InFlightGuard<'a> {
  set: &'a Mutex<HashSet<EntityId>>,
  id: EntityId,
}

impl Drop for InFlightGuard<'_> {
  fn drop(&mut self) {
    self.set.lock().remove(&self.id);
  }
}
