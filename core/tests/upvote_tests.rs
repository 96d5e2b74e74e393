// tests/upvote_tests.rs
mod common;

use common::*;
use serde_json::json;
use serial_test::serial;
use std::sync::Arc;
use storefront_sync::{
  Collection, CollectionController, EntityId, ErrorKind, FashionFest, Method, Notice, Operation, ResourceKind,
  Session, Upvotable,
};

fn fest_board(remote: &Arc<ScriptedRemote>) -> (Collection<FashionFest>, CollectionController<FashionFest>) {
  let collection = Collection::new();
  let controller = CollectionController::new(&public_resolver(), remote.clone(), &collection);
  (collection, controller)
}

#[tokio::test]
#[serial]
async fn test_upvote_adopts_server_vote_set_exactly() {
  setup_tracing();
  let remote = Arc::new(ScriptedRemote::new(seeded_memory()));
  let (collection, controller) = fest_board(&remote);
  controller.list().await.unwrap();
  let f1 = EntityId::from("f1");
  assert_eq!(collection.read().get(&f1).unwrap().voters(), ["A".to_string()]);

  let reconciled = controller.upvote(&f1, &signed_in("B")).await.unwrap();

  assert_eq!(reconciled.voters(), ["A".to_string(), "B".to_string()]);
  assert_eq!(collection.read().get(&f1).unwrap().voters(), ["A".to_string(), "B".to_string()]);
  let request = remote.sent().pop().unwrap();
  assert_eq!(request.method, Method::Post);
  assert_eq!(request.url, "http://shop.test/api/fests/f1/upvote");
  assert_eq!(request.bearer.unwrap().header_value(), "Bearer B");
}

#[tokio::test]
#[serial]
async fn test_repeat_vote_reflects_server_dedup() {
  setup_tracing();
  let remote = Arc::new(ScriptedRemote::new(seeded_memory()));
  let (collection, controller) = fest_board(&remote);
  controller.list().await.unwrap();
  let f1 = EntityId::from("f1");

  controller.upvote(&f1, &signed_in("A")).await.unwrap();

  assert_eq!(collection.read().get(&f1).unwrap().vote_count(), 1);
}

#[tokio::test]
#[serial]
async fn test_upvote_replaces_entity_wholesale() {
  setup_tracing();
  let remote = Arc::new(ScriptedRemote::new(seeded_memory()));
  let (collection, controller) = fest_board(&remote);
  controller.list().await.unwrap();
  let f2 = EntityId::from("f2");
  collection.write().select(&f2);

  // Another client renamed the fest and voted meanwhile.
  let endpoint = public_resolver().resolve(ResourceKind::FashionFests);
  remote.inner.seed(
    &endpoint,
    vec![fest_doc("f1", "Lakme Week", &["A"]), fest_doc("f2", "Street Style Live", &["C"])],
  );

  let reconciled = controller.upvote(&f2, &signed_in("D")).await.unwrap();

  let cache = collection.read();
  let cached = cache.get(&f2).unwrap();
  assert_eq!(cached, &reconciled);
  assert_eq!(cached.name, "Street Style Live");
  assert_eq!(cached.voters(), ["C".to_string(), "D".to_string()]);
  assert_eq!(cache.selected(), Some(cached), "selection follows the reconciled entity");
}

#[tokio::test]
#[serial]
async fn test_upvote_without_token_sends_nothing() {
  setup_tracing();
  let remote = Arc::new(ScriptedRemote::new(seeded_memory()));
  let (collection, controller) = fest_board(&remote);
  controller.list().await.unwrap();
  let before = collection.read().clone();
  let sent_before = remote.sent_count();

  let err = controller.upvote(&EntityId::from("f1"), &Session::new()).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Authorization);
  assert_eq!(remote.sent_count(), sent_before);
  assert_eq!(*collection.read(), before);
  let notice = Notice::from_error(Operation::Upvote(ResourceKind::FashionFests), &err);
  assert_eq!(notice.message, "You must be logged in to upvote.");
}

#[tokio::test]
#[serial]
async fn test_failed_upvote_leaves_cache_unchanged() {
  setup_tracing();
  let remote = Arc::new(ScriptedRemote::new(seeded_memory()));
  let (collection, controller) = fest_board(&remote);
  controller.list().await.unwrap();
  let before = collection.read().clone();

  remote.fail_next_status(500, json!({ "message": "Fest is locked" }));
  let err = controller.upvote(&EntityId::from("f1"), &signed_in("B")).await.unwrap_err();

  assert_eq!(*collection.read(), before);
  assert_eq!(err.reported_message(), Some("Fest is locked"));
  let notice = Notice::from_error(Operation::Upvote(ResourceKind::FashionFests), &err);
  assert_eq!(notice.kind, ErrorKind::Server);
  assert_eq!(notice.message, "Failed to upvote fest.");
}

#[tokio::test]
#[serial]
async fn test_upvote_answered_without_an_id_is_not_cached() {
  setup_tracing();
  let remote = Arc::new(ScriptedRemote::new(seeded_memory()));
  let (collection, controller) = fest_board(&remote);
  controller.list().await.unwrap();
  let before = collection.read().clone();

  remote.reply_next(json!({
    "name": "Lakme Week",
    "startDate": "2025-01-05",
    "endDate": "2025-01-07",
    "upvotes": ["A", "B"]
  }));
  let err = controller.upvote(&EntityId::from("f1"), &signed_in("B")).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Server);
  assert_eq!(*collection.read(), before);
  assert!(collection.read().iter().all(|fest| fest.id.is_some()));
}

#[tokio::test]
#[serial]
async fn test_refused_token_is_an_authorization_error() {
  setup_tracing();
  let remote = Arc::new(ScriptedRemote::new(seeded_memory()));
  let (_collection, controller) = fest_board(&remote);
  controller.list().await.unwrap();

  remote.fail_next_status(401, json!({ "message": "Not authorized, token failed" }));
  let err = controller.upvote(&EntityId::from("f1"), &signed_in("expired")).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Authorization);
  assert_eq!(err.reported_message(), Some("Not authorized, token failed"));
}

#[tokio::test]
#[serial]
async fn test_upvote_of_uncached_fest_returns_result_and_keeps_cache() {
  setup_tracing();
  let remote = Arc::new(ScriptedRemote::new(seeded_memory()));
  let (collection, controller) = fest_board(&remote);
  controller.list().await.unwrap();
  collection.write().remove(&EntityId::from("f2"));
  let before = collection.read().clone();

  let reconciled = controller.upvote(&EntityId::from("f2"), &signed_in("E")).await.unwrap();

  assert_eq!(reconciled.voters(), ["E".to_string()]);
  assert_eq!(*collection.read(), before);
}
