// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storefront_sync::{
  BearerToken, CatalogItem, EndpointResolver, EndpointScope, FashionFest, MemoryRemote, Method, RemoteFailure,
  RemoteRequest, RemoteResponse, RemoteStore, ResourceKind, Session,
};
use tokio::sync::Notify;
use tracing::Level;

pub const BASE_URL: &str = "http://shop.test/api";

pub fn admin_resolver() -> EndpointResolver {
  EndpointResolver::new(BASE_URL, EndpointScope::Admin)
}

pub fn public_resolver() -> EndpointResolver {
  EndpointResolver::new(BASE_URL, EndpointScope::Public)
}

// --- Fixtures ---
pub fn kurta_doc() -> Value {
  json!({ "_id": "p1", "name": "Kurta", "price": 1199, "category": "Ethnic", "description": "Cotton kurta" })
}

pub fn sneakers_doc() -> Value {
  json!({ "_id": "p2", "name": "Sneakers", "price": 2499.5, "category": "Footwear" })
}

pub fn product_docs() -> Vec<Value> {
  vec![kurta_doc(), sneakers_doc()]
}

pub fn fest_doc(id: &str, name: &str, voters: &[&str]) -> Value {
  json!({
    "_id": id,
    "name": name,
    "location": "Palace Grounds",
    "city": "Bengaluru",
    "startDate": "2025-01-05",
    "endDate": "2025-01-07",
    "gstNumber": "29ABCDE1234F1Z5",
    "description": "Winter showcase",
    "upvotes": voters,
  })
}

pub fn fest_docs() -> Vec<Value> {
  vec![fest_doc("f1", "Lakme Week", &["A"]), fest_doc("f2", "Street Style", &[])]
}

pub fn fest_draft(name: &str) -> FashionFest {
  FashionFest::draft(
    name,
    "Jio World Centre",
    "Mumbai",
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
    "27ABCDE1234F1Z5",
  )
}

pub fn kurta_item() -> CatalogItem {
  CatalogItem::new("p1", "Kurta", Decimal::new(1199, 0)).with_category("Ethnic")
}

pub fn signed_in(token: &str) -> Session {
  Session::with_token(BearerToken::new(token).unwrap())
}

/// A `MemoryRemote` seeded with the product and fest fixtures under both scopes.
pub fn seeded_memory() -> MemoryRemote {
  let admin = admin_resolver();
  let public = public_resolver();
  MemoryRemote::new()
    .with_collection(&admin.resolve(ResourceKind::Products), product_docs())
    .with_collection(&admin.resolve(ResourceKind::FashionFests), fest_docs())
    .with_collection(&public.resolve(ResourceKind::FashionFests), fest_docs())
}

// --- Scripted remote ---

/// Wraps a `MemoryRemote`: records every request, can answer the next requests with queued
/// outcomes, and can hold requests until released.
pub struct ScriptedRemote {
  pub inner: MemoryRemote,
  sent: Mutex<Vec<RemoteRequest>>,
  scripted: Mutex<VecDeque<Result<RemoteResponse, RemoteFailure>>>,
  hold: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedRemote {
  pub fn new(inner: MemoryRemote) -> Self {
    Self {
      inner,
      sent: Mutex::new(Vec::new()),
      scripted: Mutex::new(VecDeque::new()),
      hold: Mutex::new(None),
    }
  }

  pub fn fail_next(&self, failure: RemoteFailure) {
    self.scripted.lock().push_back(Err(failure));
  }

  /// Answers the next request with a 200 and `body` instead of delegating.
  pub fn reply_next(&self, body: Value) {
    self.scripted.lock().push_back(Ok(RemoteResponse::ok(body)));
  }

  pub fn fail_next_unreachable(&self) {
    self.fail_next(RemoteFailure::unreachable("connection refused"));
  }

  pub fn fail_next_status(&self, status: u16, body: Value) {
    self.fail_next(RemoteFailure::status(status, Some(body)));
  }

  /// Requests block after being recorded until the returned `Notify` is signalled.
  pub fn hold_requests(&self) -> Arc<Notify> {
    let notify = Arc::new(Notify::new());
    *self.hold.lock() = Some(notify.clone());
    notify
  }

  /// New requests pass straight through; requests already held stay held.
  pub fn stop_holding(&self) {
    *self.hold.lock() = None;
  }

  pub fn sent(&self) -> Vec<RemoteRequest> {
    self.sent.lock().clone()
  }

  pub fn sent_count(&self) -> usize {
    self.sent.lock().len()
  }

  /// Yields until at least `count` requests have been recorded.
  pub async fn wait_until_sent(&self, count: usize) {
    while self.sent_count() < count {
      tokio::task::yield_now().await;
    }
  }

  pub fn sent_with(&self, method: Method) -> usize {
    self.sent.lock().iter().filter(|r| r.method == method).count()
  }
}

#[async_trait]
impl RemoteStore for ScriptedRemote {
  async fn send(&self, request: RemoteRequest) -> Result<RemoteResponse, RemoteFailure> {
    self.sent.lock().push(request.clone());
    REMOTE_CALLS.fetch_add(1, Ordering::SeqCst);

    let hold = self.hold.lock().clone();
    if let Some(release) = hold {
      release.notified().await;
    }

    let scripted = self.scripted.lock().pop_front();
    if let Some(outcome) = scripted {
      tracing::debug!(
        target: "scripted_remote",
        method = %request.method,
        url = %request.url,
        failing = outcome.is_err(),
        "answering scripted request"
      );
      return outcome;
    }
    self.inner.send(request).await
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Global request counter, shared by every ScriptedRemote in a test binary ---
pub static REMOTE_CALLS: Lazy<AtomicUsize> = Lazy::new(|| AtomicUsize::new(0));

pub fn reset_counters() {
  REMOTE_CALLS.store(0, Ordering::SeqCst);
}

pub fn remote_calls() -> usize {
  REMOTE_CALLS.load(Ordering::SeqCst)
}
