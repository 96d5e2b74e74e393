// demos/storefront_app/src/services/http_remote.rs

use crate::errors::Result as AppResult;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use storefront_sync::{Method, RemoteFailure, RemoteRequest, RemoteResponse, RemoteStore};
use tracing::{debug, instrument, warn};

/// `RemoteStore` over HTTP. Performs exactly one request per call; never retries.
#[derive(Debug, Clone)]
pub struct HttpRemote {
  client: Client,
}

impl HttpRemote {
  pub fn new(timeout: Duration) -> AppResult<Self> {
    let client = Client::builder()
      .user_agent(concat!("storefront-app/", env!("CARGO_PKG_VERSION")))
      .timeout(timeout)
      .build()?;
    Ok(Self { client })
  }

  pub(crate) fn client(&self) -> &Client {
    &self.client
  }
}

/// Reads a body as JSON. Empty bodies are `None`; unparseable bodies are reported as text.
pub(crate) async fn read_json_body(response: Response) -> Result<Option<Value>, RemoteFailure> {
  let status = response.status().as_u16();
  let bytes = response.bytes().await.map_err(|e| RemoteFailure::Unreachable { source: e.into() })?;
  if bytes.is_empty() {
    return Ok(None);
  }
  match serde_json::from_slice(&bytes) {
    Ok(value) => Ok(Some(value)),
    Err(e) => {
      warn!(status, error = %e, "Response body is not JSON.");
      Ok(Some(Value::String(String::from_utf8_lossy(&bytes).into_owned())))
    }
  }
}

/// Maps a received response onto the remote contract: 2xx is success, anything else a
/// status failure carrying whatever body came back.
pub(crate) async fn classify(response: Response) -> Result<RemoteResponse, RemoteFailure> {
  let status = response.status();
  let body = read_json_body(response).await?;
  if status.is_success() {
    // A 2xx body that is not JSON cannot be decoded into an entity.
    if let Some(Value::String(_)) = body {
      return Err(RemoteFailure::status(status.as_u16(), None));
    }
    Ok(RemoteResponse {
      status: status.as_u16(),
      body,
    })
  } else {
    let body = body.filter(|b| b.is_object());
    Err(RemoteFailure::status(status.as_u16(), body))
  }
}

#[async_trait]
impl RemoteStore for HttpRemote {
  #[instrument(name = "HttpRemote::send", skip_all, fields(method = %request.method, url = %request.url))]
  async fn send(&self, request: RemoteRequest) -> Result<RemoteResponse, RemoteFailure> {
    let mut builder = match request.method {
      Method::Get => self.client.get(&request.url),
      Method::Post => self.client.post(&request.url),
      Method::Put => self.client.put(&request.url),
      Method::Delete => self.client.delete(&request.url),
    };
    if let Some(token) = &request.bearer {
      builder = builder.header(AUTHORIZATION, token.header_value());
    }
    if let Some(body) = &request.body {
      builder = builder.json(body);
    }

    let response = builder.send().await.map_err(|e| {
      warn!(error = %e, "No response from backend.");
      RemoteFailure::Unreachable { source: e.into() }
    })?;
    debug!(status = response.status().as_u16(), "Backend responded.");
    classify(response).await
  }
}
