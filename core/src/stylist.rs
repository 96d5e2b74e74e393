// storefront_sync/src/stylist.rs

//! Client side of the outfit recommendation service: photo upload plus season and
//! occasion, answered with an ordered list of outfit images.

use crate::error::{SyncError, SyncResult};
use crate::remote::{RemoteFailure, RemoteResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{event, instrument, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Season {
  #[default]
  Summer,
  Winter,
  Fall,
  Spring,
}

impl Season {
  pub const ALL: [Season; 4] = [Season::Summer, Season::Winter, Season::Fall, Season::Spring];

  pub fn as_str(self) -> &'static str {
    match self {
      Season::Summer => "Summer",
      Season::Winter => "Winter",
      Season::Fall => "Fall",
      Season::Spring => "Spring",
    }
  }
}

/// The "usage" form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Occasion {
  #[default]
  Casual,
  Formal,
  Sports,
  Party,
  Work,
  Ethnic,
}

impl Occasion {
  pub const ALL: [Occasion; 6] = [
    Occasion::Casual,
    Occasion::Formal,
    Occasion::Sports,
    Occasion::Party,
    Occasion::Work,
    Occasion::Ethnic,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Occasion::Casual => "Casual",
      Occasion::Formal => "Formal",
      Occasion::Sports => "Sports",
      Occasion::Party => "Party",
      Occasion::Work => "Work",
      Occasion::Ethnic => "Ethnic",
    }
  }
}

macro_rules! labelled_choice {
  ($ty:ty, $field:literal) => {
    impl fmt::Display for $ty {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
      }
    }

    impl FromStr for $ty {
      type Err = SyncError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        <$ty>::ALL
          .into_iter()
          .find(|choice| choice.as_str().eq_ignore_ascii_case(s.trim()))
          .ok_or_else(|| {
            let allowed: Vec<&str> = <$ty>::ALL.iter().map(|c| c.as_str()).collect();
            SyncError::validation($field, format!("Choose one of: {}.", allowed.join(", ")))
          })
      }
    }
  };
}

labelled_choice!(Season, "season");
labelled_choice!(Occasion, "usage");

/// One upload. `image` holds the raw file bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct StyleRequest {
  pub image: Vec<u8>,
  pub file_name: String,
  pub season: Season,
  pub occasion: Occasion,
}

impl StyleRequest {
  pub fn new(image: Vec<u8>, file_name: impl Into<String>) -> Self {
    Self {
      image,
      file_name: file_name.into(),
      season: Season::default(),
      occasion: Occasion::default(),
    }
  }

  pub fn with_season(mut self, season: Season) -> Self {
    self.season = season;
    self
  }

  pub fn with_occasion(mut self, occasion: Occasion) -> Self {
    self.occasion = occasion;
    self
  }

  /// MIME type guessed from the file extension.
  pub fn content_type(&self) -> &'static str {
    let extension = self
      .file_name
      .rsplit_once('.')
      .map(|(_, ext)| ext.to_ascii_lowercase())
      .unwrap_or_default();
    match extension.as_str() {
      "png" => "image/png",
      "webp" => "image/webp",
      "gif" => "image/gif",
      _ => "image/jpeg",
    }
  }
}

impl fmt::Debug for StyleRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StyleRequest")
      .field("image", &format_args!("{} bytes", self.image.len()))
      .field("file_name", &self.file_name)
      .field("season", &self.season)
      .field("occasion", &self.occasion)
      .finish()
  }
}

/// An opaque display reference for one outfit (typically an inline `data:` image URI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recommendation(pub String);

impl Recommendation {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_inline_image(&self) -> bool {
    self.0.starts_with("data:image/")
  }
}

/// Transport for the recommendation service. One upload per call.
#[async_trait]
pub trait StylistService: Send + Sync {
  async fn recommend(&self, request: &StyleRequest) -> Result<RemoteResponse, RemoteFailure>;
}

#[derive(Deserialize)]
struct OutfitsBody {
  outfits: Option<Vec<Recommendation>>,
}

/// Uploads `request` and decodes the outfits, in the order the service ranked them.
#[instrument(
  name = "stylist::request_recommendations",
  skip_all,
  fields(season = %request.season, occasion = %request.occasion, bytes = request.image.len()),
  err(Display)
)]
pub async fn request_recommendations(
  service: &dyn StylistService,
  request: &StyleRequest,
) -> SyncResult<Vec<Recommendation>> {
  if request.image.is_empty() {
    return Err(SyncError::validation("image", "Please upload an image."));
  }

  let response = service.recommend(request).await.map_err(SyncError::from)?;
  let missing = || SyncError::Server {
    status: response.status,
    message: Some("Failed to get recommendations from the server.".to_string()),
  };

  let outfits = response
    .body
    .clone()
    .and_then(|body: Value| serde_json::from_value::<OutfitsBody>(body).ok())
    .and_then(|body| body.outfits)
    .ok_or_else(missing)?;

  event!(Level::INFO, count = outfits.len(), "Received outfit recommendations.");
  Ok(outfits)
}
