// storefront_sync/src/remote/memory.rs

//! In-process backend implementing the REST contract over JSON documents.

use crate::endpoint::Endpoint;
use crate::model::entity::ID_FIELD;
use crate::remote::{Method, RemoteFailure, RemoteRequest, RemoteResponse, RemoteStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::{event, Level};

const UPVOTES_FIELD: &str = "upvotes";

#[derive(Debug, Default)]
struct MemoryState {
  collections: HashMap<String, Vec<Value>>,
  next_id: u64,
  log: Vec<(Method, String)>,
}

impl MemoryState {
  fn assign_id(&mut self) -> String {
    self.next_id += 1;
    format!("mem-{}", self.next_id)
  }
}

/// Backend double: ids are assigned as `mem-N`, repeat votes by the same bearer token
/// are deduplicated, upvote requires a bearer token. Every request is logged.
#[derive(Debug, Default)]
pub struct MemoryRemote {
  state: Mutex<MemoryState>,
}

enum Route {
  Collection(String),
  Member(String, String),
  Upvote(String, String),
}

impl MemoryRemote {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a collection, seeding it with documents. Seeds without `_id` get one.
  pub fn with_collection(self, endpoint: &Endpoint, seed: Vec<Value>) -> Self {
    self.seed(endpoint, seed);
    self
  }

  pub fn seed(&self, endpoint: &Endpoint, seed: Vec<Value>) {
    let mut state = self.state.lock();
    let mut documents = Vec::with_capacity(seed.len());
    for mut document in seed {
      if let Value::Object(map) = &mut document {
        if !map.contains_key(ID_FIELD) {
          let id = state.assign_id();
          map.insert(ID_FIELD.to_string(), Value::String(id));
        }
      }
      documents.push(document);
    }
    state.collections.insert(endpoint.collection_url().to_string(), documents);
  }

  /// Current documents of a collection (empty if unknown).
  pub fn documents(&self, endpoint: &Endpoint) -> Vec<Value> {
    self
      .state
      .lock()
      .collections
      .get(endpoint.collection_url())
      .cloned()
      .unwrap_or_default()
  }

  /// Every request received so far, in order.
  pub fn requests(&self) -> Vec<(Method, String)> {
    self.state.lock().log.clone()
  }

  pub fn request_count(&self) -> usize {
    self.state.lock().log.len()
  }

  fn route(state: &MemoryState, url: &str) -> Option<Route> {
    for collection in state.collections.keys() {
      let Some(rest) = url.strip_prefix(collection.as_str()) else {
        continue;
      };
      if rest.is_empty() {
        return Some(Route::Collection(collection.clone()));
      }
      let Some(rest) = rest.strip_prefix('/') else {
        continue;
      };
      let segments: Vec<&str> = rest.split('/').collect();
      return match segments.as_slice() {
        [id] if !id.is_empty() => Some(Route::Member(collection.clone(), id.to_string())),
        [id, "upvote"] if !id.is_empty() => Some(Route::Upvote(collection.clone(), id.to_string())),
        _ => None,
      };
    }
    None
  }
}

fn not_found(what: &str) -> RemoteFailure {
  RemoteFailure::status(404, Some(json!({ "message": format!("{} not found", what) })))
}

fn document_id(document: &Value) -> Option<&str> {
  document.get(ID_FIELD).and_then(Value::as_str)
}

#[async_trait]
impl RemoteStore for MemoryRemote {
  async fn send(&self, request: RemoteRequest) -> Result<RemoteResponse, RemoteFailure> {
    let mut state = self.state.lock();
    state.log.push((request.method, request.url.clone()));
    event!(Level::TRACE, method = %request.method, url = %request.url, "MemoryRemote received request.");

    let route = Self::route(&state, &request.url).ok_or_else(|| not_found("route"))?;
    match (request.method, route) {
      (Method::Get, Route::Collection(collection)) => {
        let documents = state.collections.get(&collection).cloned().unwrap_or_default();
        Ok(RemoteResponse::ok(Value::Array(documents)))
      }
      (Method::Post, Route::Collection(collection)) => {
        let mut document = match request.body {
          Some(Value::Object(map)) => map,
          _ => return Err(RemoteFailure::status(400, Some(json!({ "message": "Request body must be an object" })))),
        };
        let id = state.assign_id();
        document.insert(ID_FIELD.to_string(), Value::String(id));
        let document = Value::Object(document);
        state.collections.entry(collection).or_default().push(document.clone());
        Ok(RemoteResponse {
          status: 201,
          body: Some(document),
        })
      }
      (Method::Put, Route::Member(collection, id)) => {
        let mut incoming: Map<String, Value> = match request.body {
          Some(Value::Object(map)) => map,
          _ => return Err(RemoteFailure::status(400, Some(json!({ "message": "Request body must be an object" })))),
        };
        let documents = state.collections.entry(collection).or_default();
        let stored = documents
          .iter_mut()
          .find(|doc| document_id(doc) == Some(id.as_str()))
          .ok_or_else(|| not_found("document"))?;
        // Vote state is server-owned; an update body never overwrites it.
        incoming.remove(UPVOTES_FIELD);
        if let Some(votes) = stored.get(UPVOTES_FIELD).cloned() {
          incoming.insert(UPVOTES_FIELD.to_string(), votes);
        }
        incoming.insert(ID_FIELD.to_string(), Value::String(id));
        *stored = Value::Object(incoming);
        Ok(RemoteResponse::ok(stored.clone()))
      }
      (Method::Delete, Route::Member(collection, id)) => {
        let documents = state.collections.entry(collection).or_default();
        let index = documents
          .iter()
          .position(|doc| document_id(doc) == Some(id.as_str()))
          .ok_or_else(|| not_found("document"))?;
        documents.remove(index);
        Ok(RemoteResponse::no_content())
      }
      (Method::Post, Route::Upvote(collection, id)) => {
        let voter = request
          .bearer
          .as_ref()
          .map(|token| token.as_str().to_string())
          .ok_or_else(|| RemoteFailure::status(401, Some(json!({ "message": "Not authorized, no token" }))))?;
        let documents = state.collections.entry(collection).or_default();
        let stored = documents
          .iter_mut()
          .find(|doc| document_id(doc) == Some(id.as_str()))
          .ok_or_else(|| not_found("document"))?;
        let Value::Object(map) = stored else {
          return Err(RemoteFailure::status(500, None));
        };
        let votes = map
          .entry(UPVOTES_FIELD.to_string())
          .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(voters) = votes {
          if !voters.iter().any(|v| v.as_str() == Some(voter.as_str())) {
            voters.push(Value::String(voter));
          }
        }
        Ok(RemoteResponse::ok(stored.clone()))
      }
      _ => Err(RemoteFailure::status(405, Some(json!({ "message": "Method not allowed" })))),
    }
  }
}
