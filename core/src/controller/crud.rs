// storefront_sync/src/controller/crud.rs

//! Create, update and delete for `CollectionController<R>`.

use crate::controller::{CollectionController, ConfirmPrompt, ConfirmationGate};
use crate::error::{SyncError, SyncResult};
use crate::model::entity::ID_FIELD;
use crate::model::{EntityId, MutationPolicy, Resource};
use crate::remote::{decode_entity, RemoteRequest};
use crate::session::Session;
use tracing::{event, instrument, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
  Create,
  Update,
}

impl SaveMode {
  /// Verb used in user-facing messages.
  pub fn verb(&self) -> &'static str {
    match self {
      SaveMode::Create => "create",
      SaveMode::Update => "update",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
  Removed,
  /// The confirmation gate declined; nothing was sent.
  Declined,
}

impl<R: Resource> CollectionController<R> {
  /// Creates or updates `draft` remotely and mirrors the server's entity into the cache.
  ///
  /// Local validation and the credential check run first; if either fails no request is
  /// issued. The cache is left exactly as before on any failure.
  #[instrument(
    name = "CollectionController::save",
    skip_all,
    fields(kind = %R::KIND, mode = ?mode, id = ?draft.id()),
    err(Display)
  )]
  pub async fn save(&self, draft: &R, mode: SaveMode, session: &Session) -> SyncResult<R> {
    draft.validate()?;
    let bearer = self.write_credential(session)?;
    let payload = draft.write_payload()?;

    match mode {
      SaveMode::Create => {
        let request = RemoteRequest::create(&self.endpoint, payload).with_bearer(bearer);
        let response = self.dispatch(request).await?;
        let created: R = decode_entity(response)?;
        if created.id().is_none() {
          return Err(SyncError::Server {
            status: 200,
            message: Some(format!("The server returned a {} without an id.", R::KIND.singular())),
          });
        }
        self.apply("create", |cache| cache.append(created.clone()));
        event!(Level::INFO, id = ?created.id(), "Entity created.");
        Ok(created)
      }
      SaveMode::Update => {
        let id = draft
          .id()
          .cloned()
          .ok_or_else(|| {
            SyncError::validation(ID_FIELD, format!("Only a saved {} can be updated.", R::KIND.singular()))
          })?;
        let _guard = self.begin_mutation(&id)?;

        let previous = match self.policy {
          MutationPolicy::Optimistic => self.apply("update", |cache| cache.replace(&id, draft.clone())).flatten(),
          MutationPolicy::ConfirmOnly => None,
        };

        let request = RemoteRequest::update(&self.endpoint, &id, payload).with_bearer(bearer);
        let outcome = match self.dispatch(request).await {
          Ok(response) => decode_entity::<R>(response).and_then(|updated| self.confirm_identity(&id, updated)),
          Err(error) => Err(error),
        };

        match outcome {
          Ok(updated) => {
            self.commit_update(&id, &updated);
            Ok(updated)
          }
          Err(error) => {
            if let Some(previous) = previous {
              event!(Level::DEBUG, id = %id, "Rolling back optimistic update.");
              self.apply("update rollback", |cache| cache.replace(&id, previous));
            }
            Err(error)
          }
        }
      }
    }
  }

  fn commit_update(&self, id: &EntityId, updated: &R) {
    let replaced = self.apply("update", |cache| cache.replace(id, updated.clone()));
    match replaced {
      Some(Some(_)) => event!(Level::INFO, id = %id, "Entity updated."),
      Some(None) => event!(
        Level::WARN,
        id = %id,
        "Server confirmed an update but no matching row is cached; leaving cache as-is."
      ),
      None => {}
    }
  }

  /// Deletes `id` after `gate` approves. A declined gate sends nothing and changes nothing.
  #[instrument(
    name = "CollectionController::remove",
    skip_all,
    fields(kind = %R::KIND, id = %id),
    err(Display)
  )]
  pub async fn remove(
    &self,
    id: &EntityId,
    gate: &dyn ConfirmationGate,
    session: &Session,
  ) -> SyncResult<RemoveOutcome> {
    let _guard = self.begin_mutation(id)?;

    let prompt = ConfirmPrompt::delete(R::KIND, id);
    if !gate.confirm(&prompt) {
      event!(Level::DEBUG, "Delete declined at confirmation.");
      return Ok(RemoveOutcome::Declined);
    }

    let removed = match self.policy {
      MutationPolicy::Optimistic => self.apply("remove", |cache| cache.remove(id)).flatten(),
      MutationPolicy::ConfirmOnly => None,
    };

    let request = RemoteRequest::delete(&self.endpoint, id).with_bearer(session.token());
    match self.dispatch(request).await {
      Ok(_) => {
        // A listing that landed while the delete was in flight may have brought the row back.
        let removed = self.apply("remove", |cache| cache.remove(id));
        if let (MutationPolicy::ConfirmOnly, Some(None)) = (self.policy, removed) {
          event!(Level::WARN, "Server confirmed a delete but no matching row is cached.");
        }
        event!(Level::INFO, "Entity deleted.");
        Ok(RemoveOutcome::Removed)
      }
      Err(error) => {
        if let Some((index, entity)) = removed {
          event!(Level::DEBUG, index, "Rolling back optimistic delete.");
          self.apply("remove rollback", |cache| cache.restore(index, entity));
        }
        Err(error)
      }
    }
  }
}
