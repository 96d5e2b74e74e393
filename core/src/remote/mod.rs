// storefront_sync/src/remote/mod.rs

//! Request/response contract with the backend, and failure classification.

pub mod memory;

pub use memory::MemoryRemote;

use crate::endpoint::Endpoint;
use crate::error::{FieldError, SyncError, SyncResult};
use crate::model::{EntityId, Resource};
use crate::session::BearerToken;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
  Get,
  Post,
  Put,
  Delete,
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Method::Get => "GET",
      Method::Post => "POST",
      Method::Put => "PUT",
      Method::Delete => "DELETE",
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
  pub method: Method,
  pub url: String,
  pub body: Option<Value>,
  pub bearer: Option<BearerToken>,
}

impl RemoteRequest {
  /// `GET /{kind}`
  pub fn list(endpoint: &Endpoint) -> Self {
    Self::new(Method::Get, endpoint.collection_url().to_string(), None)
  }

  /// `POST /{kind}` with the entity payload.
  pub fn create(endpoint: &Endpoint, payload: Value) -> Self {
    Self::new(Method::Post, endpoint.collection_url().to_string(), Some(payload))
  }

  /// `PUT /{kind}/{id}` with the entity payload.
  pub fn update(endpoint: &Endpoint, id: &EntityId, payload: Value) -> Self {
    Self::new(Method::Put, endpoint.member_url(id), Some(payload))
  }

  /// `DELETE /{kind}/{id}`
  pub fn delete(endpoint: &Endpoint, id: &EntityId) -> Self {
    Self::new(Method::Delete, endpoint.member_url(id), None)
  }

  /// `POST /{kind}/{id}/upvote` with an empty object body.
  pub fn upvote(endpoint: &Endpoint, id: &EntityId) -> Self {
    Self::new(Method::Post, endpoint.upvote_url(id), Some(Value::Object(Default::default())))
  }

  fn new(method: Method, url: String, body: Option<Value>) -> Self {
    Self {
      method,
      url,
      body,
      bearer: None,
    }
  }

  pub fn with_bearer(mut self, bearer: Option<BearerToken>) -> Self {
    self.bearer = bearer;
    self
  }
}

/// A 2xx response. `body` is `None` for empty bodies (e.g. DELETE).
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse {
  pub status: u16,
  pub body: Option<Value>,
}

impl RemoteResponse {
  pub fn ok(body: Value) -> Self {
    Self {
      status: 200,
      body: Some(body),
    }
  }

  pub fn no_content() -> Self {
    Self {
      status: 204,
      body: None,
    }
  }
}

#[derive(Debug, Error)]
pub enum RemoteFailure {
  /// No response was received.
  #[error("no response from backend: {source}")]
  Unreachable {
    #[source]
    source: anyhow::Error,
  },
  /// A response with a non-2xx status. `body` is the decoded JSON body, if any.
  #[error("backend responded with status {status}")]
  Status { status: u16, body: Option<Value> },
}

impl RemoteFailure {
  pub fn unreachable(message: impl fmt::Display + fmt::Debug + Send + Sync + 'static) -> Self {
    RemoteFailure::Unreachable {
      source: anyhow::anyhow!(message),
    }
  }

  pub fn status(status: u16, body: Option<Value>) -> Self {
    RemoteFailure::Status { status, body }
  }
}

/// The backend collaborator. Implementations perform exactly one request per call and
/// never retry.
#[async_trait]
pub trait RemoteStore: Send + Sync + 'static {
  async fn send(&self, request: RemoteRequest) -> Result<RemoteResponse, RemoteFailure>;
}

impl From<RemoteFailure> for SyncError {
  fn from(failure: RemoteFailure) -> Self {
    match failure {
      RemoteFailure::Unreachable { source } => SyncError::Network { source },
      RemoteFailure::Status { status, body } => {
        let message = body.as_ref().and_then(body_message);
        match status {
          400 | 422 => {
            let fields = body.as_ref().map(body_field_errors).unwrap_or_default();
            SyncError::Validation {
              message: message.unwrap_or_else(|| "The server rejected the submitted data.".to_string()),
              fields,
            }
          }
          401 | 403 => SyncError::Authorization {
            message: message.unwrap_or_else(|| "The server refused the credential.".to_string()),
          },
          _ => SyncError::Server { status, message },
        }
      }
    }
  }
}

/// `message`, else `error`, from a JSON error body.
fn body_message(body: &Value) -> Option<String> {
  ["message", "error"]
    .iter()
    .find_map(|key| body.get(*key).and_then(Value::as_str))
    .map(str::to_string)
}

/// Field messages from `errors`, which backends send either as
/// `{ "field": "msg" | { "message": "msg" } }` or `[{ "field"|"path": .., "message": .. }]`.
fn body_field_errors(body: &Value) -> Vec<FieldError> {
  match body.get("errors") {
    Some(Value::Object(map)) => map
      .iter()
      .filter_map(|(field, detail)| {
        let message = match detail {
          Value::String(text) => Some(text.clone()),
          other => other.get("message").and_then(Value::as_str).map(str::to_string),
        }?;
        Some(FieldError::new(field.clone(), message))
      })
      .collect(),
    Some(Value::Array(entries)) => entries
      .iter()
      .filter_map(|entry| {
        let field = entry.get("field").or_else(|| entry.get("path")).and_then(Value::as_str)?;
        let message = entry.get("message").and_then(Value::as_str)?;
        Some(FieldError::new(field, message))
      })
      .collect(),
    _ => Vec::new(),
  }
}

pub(crate) fn decode_body<T: DeserializeOwned>(response: RemoteResponse, what: &str) -> SyncResult<T> {
  let status = response.status;
  let body = response.body.ok_or_else(|| SyncError::Server {
    status,
    message: Some(format!("The server sent an empty response for {}.", what)),
  })?;
  serde_json::from_value(body).map_err(|e| SyncError::Server {
    status,
    message: Some(format!("The server sent a malformed {}: {}", what, e)),
  })
}

pub(crate) fn decode_entity<R: Resource>(response: RemoteResponse) -> SyncResult<R> {
  decode_body(response, R::KIND.singular())
}

pub(crate) fn decode_listing<R: Resource>(response: RemoteResponse) -> SyncResult<Vec<R>> {
  decode_body(response, R::KIND.token())
}
