// tests/stylist_tests.rs
mod common;

use async_trait::async_trait;
use common::*;
use parking_lot::Mutex;
use serde_json::{json, Value};
use storefront_sync::stylist::request_recommendations;
use storefront_sync::{
  ErrorKind, Notice, Occasion, Operation, RemoteFailure, RemoteResponse, Season, StyleRequest, StylistService,
};

/// Replies with a fixed outcome and remembers what it was asked.
struct CannedStylist {
  reply: Mutex<Option<Result<RemoteResponse, RemoteFailure>>>,
  asked: Mutex<Vec<(Season, Occasion, usize)>>,
}

impl CannedStylist {
  fn replying(reply: Result<RemoteResponse, RemoteFailure>) -> Self {
    Self {
      reply: Mutex::new(Some(reply)),
      asked: Mutex::new(Vec::new()),
    }
  }

  fn with_body(body: Value) -> Self {
    Self::replying(Ok(RemoteResponse::ok(body)))
  }
}

#[async_trait]
impl StylistService for CannedStylist {
  async fn recommend(&self, request: &StyleRequest) -> Result<RemoteResponse, RemoteFailure> {
    self.asked.lock().push((request.season, request.occasion, request.image.len()));
    self
      .reply
      .lock()
      .take()
      .unwrap_or_else(|| Err(RemoteFailure::unreachable("no reply scripted")))
  }
}

fn photo() -> StyleRequest {
  StyleRequest::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "me.jpg")
}

#[tokio::test]
async fn test_recommendations_keep_service_order() {
  setup_tracing();
  let service = CannedStylist::with_body(json!({
    "outfits": ["data:image/jpeg;base64,AAA", "data:image/jpeg;base64,BBB"]
  }));
  let request = photo().with_season(Season::Winter).with_occasion(Occasion::Ethnic);

  let outfits = request_recommendations(&service, &request).await.unwrap();

  assert_eq!(outfits.len(), 2);
  assert_eq!(outfits[0].as_str(), "data:image/jpeg;base64,AAA");
  assert!(outfits.iter().all(|o| o.is_inline_image()));
  assert_eq!(*service.asked.lock(), vec![(Season::Winter, Occasion::Ethnic, 4)]);
}

#[tokio::test]
async fn test_empty_image_is_rejected_before_upload() {
  setup_tracing();
  let service = CannedStylist::with_body(json!({ "outfits": [] }));

  let err = request_recommendations(&service, &StyleRequest::new(Vec::new(), "empty.png"))
    .await
    .unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(Notice::from_error(Operation::Recommend, &err).message, "Please upload an image.");
  assert!(service.asked.lock().is_empty());
}

#[tokio::test]
async fn test_response_without_outfits_is_a_server_error() {
  setup_tracing();
  let service = CannedStylist::with_body(json!({ "detail": "ok" }));

  let err = request_recommendations(&service, &photo()).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Server);
  assert_eq!(
    Notice::from_error(Operation::Recommend, &err).message,
    "Failed to get recommendations from the server."
  );
}

#[tokio::test]
async fn test_transport_failure_uses_generic_message() {
  setup_tracing();
  let service = CannedStylist::replying(Err(RemoteFailure::status(500, None)));

  let err = request_recommendations(&service, &photo()).await.unwrap_err();

  assert_eq!(
    Notice::from_error(Operation::Recommend, &err).message,
    "An error occurred while fetching recommendations."
  );
}

#[test]
fn test_choices_parse_case_insensitively() {
  assert_eq!("winter".parse::<Season>().unwrap(), Season::Winter);
  assert_eq!(" Party ".parse::<Occasion>().unwrap(), Occasion::Party);
  assert_eq!(Season::default(), Season::Summer);
  assert_eq!(Occasion::default().to_string(), "Casual");

  let err = "Monsoon".parse::<Season>().unwrap_err();
  assert_eq!(err.field_errors()[0].field, "season");
}

#[test]
fn test_content_type_follows_extension() {
  assert_eq!(StyleRequest::new(vec![1], "look.PNG").content_type(), "image/png");
  assert_eq!(StyleRequest::new(vec![1], "look.webp").content_type(), "image/webp");
  assert_eq!(StyleRequest::new(vec![1], "look").content_type(), "image/jpeg");
}
