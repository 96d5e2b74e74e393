// storefront_sync/src/controller/upvote.rs

//! Upvote reconciliation: the server's returned entity always wins.

use crate::controller::CollectionController;
use crate::error::SyncResult;
use crate::model::{EntityId, Upvotable};
use crate::remote::{decode_entity, RemoteRequest};
use crate::session::Session;
use tracing::{event, instrument, Level};

impl<R: Upvotable> CollectionController<R> {
  /// Records the session's vote on `id`.
  ///
  /// The vote set is never changed locally. On success the cached entity is replaced
  /// wholesale by the one the server returns, so repeat votes, concurrent votes by other
  /// users and server-side deduplication all show up exactly as the server sees them.
  #[instrument(
    name = "CollectionController::upvote",
    skip_all,
    fields(kind = %R::KIND, id = %id),
    err(Display)
  )]
  pub async fn upvote(&self, id: &EntityId, session: &Session) -> SyncResult<R> {
    let bearer = session.require_token("upvote")?;
    let _guard = self.begin_mutation(id)?;

    let request = RemoteRequest::upvote(&self.endpoint, id).with_bearer(Some(bearer));
    let response = self.dispatch(request).await?;
    let reconciled = self.confirm_identity(id, decode_entity::<R>(response)?)?;

    match self.apply("upvote", |cache| cache.replace(id, reconciled.clone())) {
      Some(Some(previous)) => event!(
        Level::INFO,
        before = previous.vote_count(),
        after = reconciled.vote_count(),
        "Upvote reconciled with server state."
      ),
      Some(None) => event!(
        Level::WARN,
        "Server accepted an upvote for an entity that is not cached; leaving cache as-is."
      ),
      None => {}
    }
    Ok(reconciled)
  }
}
