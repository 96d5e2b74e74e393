// storefront_sync/src/controller/sync.rs

//! List synchronization for `CollectionController<R>`.

use crate::controller::CollectionController;
use crate::error::SyncResult;
use crate::model::Resource;
use crate::remote::{decode_listing, RemoteRequest};
use tracing::{event, instrument, Level};

impl<R: Resource> CollectionController<R> {
  /// Fetches the full collection and replaces the cache with it.
  ///
  /// On failure the cache is cleared, so a view never shows a stale listing next to an
  /// error. Returns the number of entities cached.
  #[instrument(
    name = "CollectionController::list",
    skip_all,
    fields(kind = %R::KIND, url = %self.endpoint.collection_url()),
    err(Display)
  )]
  pub async fn list(&self) -> SyncResult<usize> {
    let outcome = match self.dispatch(RemoteRequest::list(&self.endpoint)).await {
      Ok(response) => decode_listing::<R>(response),
      Err(error) => Err(error),
    };

    match outcome {
      Ok(items) => {
        let received = items.len();
        let kept = self.apply("list", |cache| cache.replace_all(items)).unwrap_or(received);
        event!(Level::INFO, received, kept, "Collection synchronized.");
        Ok(kept)
      }
      Err(error) => {
        self.apply("list", |cache| cache.clear());
        Err(error)
      }
    }
  }
}
