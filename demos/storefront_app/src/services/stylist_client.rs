// demos/storefront_app/src/services/stylist_client.rs

use crate::services::http_remote::classify;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use storefront_sync::{RemoteFailure, RemoteResponse, StyleRequest, StylistService};
use tracing::{info, instrument};

/// Uploads photos to the outfit recommendation service as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct HttpStylist {
  client: Client,
  url: String,
}

impl HttpStylist {
  pub fn new(client: Client, url: impl Into<String>) -> Self {
    Self { client, url: url.into() }
  }
}

#[async_trait]
impl StylistService for HttpStylist {
  #[instrument(name = "HttpStylist::recommend", skip_all, fields(url = %self.url, file = %request.file_name))]
  async fn recommend(&self, request: &StyleRequest) -> Result<RemoteResponse, RemoteFailure> {
    let image = Part::bytes(request.image.clone())
      .file_name(request.file_name.clone())
      .mime_str(request.content_type())
      .map_err(|e| RemoteFailure::Unreachable {
        source: anyhow::Error::new(e).context("could not prepare the image upload"),
      })?;
    let form = Form::new()
      .part("image", image)
      .text("season", request.season.to_string())
      .text("usage", request.occasion.to_string());

    info!(bytes = request.image.len(), "Uploading photo for recommendations.");
    let response = self
      .client
      .post(&self.url)
      .multipart(form)
      .send()
      .await
      .map_err(|e| RemoteFailure::Unreachable { source: e.into() })?;
    classify(response).await
  }
}
