// storefront_sync/src/model/fest.rs

use crate::endpoint::ResourceKind;
use crate::error::{FieldError, SyncError, SyncResult};
use crate::model::entity::{require_text, EntityId, Resource, Upvotable, VoterId, ID_FIELD};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire name of the vote set. Only the upvote endpoint changes it.
const UPVOTES_FIELD: &str = "upvotes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FashionFest {
  #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
  pub id: Option<EntityId>,
  pub name: String,
  #[serde(default)]
  pub location: String,
  #[serde(default)]
  pub city: String,
  #[serde(with = "calendar_date")]
  pub start_date: NaiveDate,
  #[serde(with = "calendar_date")]
  pub end_date: NaiveDate,
  #[serde(default)]
  pub gst_number: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub upvotes: Vec<VoterId>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl FashionFest {
  pub fn draft(
    name: impl Into<String>,
    location: impl Into<String>,
    city: impl Into<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    gst_number: impl Into<String>,
  ) -> Self {
    Self {
      id: None,
      name: name.into(),
      location: location.into(),
      city: city.into(),
      start_date,
      end_date,
      gst_number: gst_number.into(),
      description: String::new(),
      upvotes: Vec::new(),
      extra: Map::new(),
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  /// "January 5, 2025" style, as shown on fest cards.
  pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
  }
}

impl Resource for FashionFest {
  const KIND: ResourceKind = ResourceKind::FashionFests;
  const WRITE_REQUIRES_AUTH: bool = true;

  fn id(&self) -> Option<&EntityId> {
    self.id.as_ref()
  }

  fn validate(&self) -> SyncResult<()> {
    let mut fields = Vec::new();
    require_text(&mut fields, "name", "Name", &self.name);
    require_text(&mut fields, "location", "Location", &self.location);
    require_text(&mut fields, "city", "City", &self.city);
    require_text(&mut fields, "gstNumber", "GST number", &self.gst_number);
    if self.end_date < self.start_date {
      fields.push(FieldError::new("endDate", "End date cannot be before the start date."));
    }
    if fields.is_empty() {
      Ok(())
    } else {
      Err(SyncError::invalid_fields(fields))
    }
  }

  fn write_payload(&self) -> SyncResult<Value> {
    let mut payload = serde_json::to_value(self).map_err(|e| SyncError::Validation {
      message: format!("Could not encode fest: {}", e),
      fields: Vec::new(),
    })?;
    if let Value::Object(map) = &mut payload {
      map.remove(ID_FIELD);
      map.remove(UPVOTES_FIELD);
    }
    Ok(payload)
  }

  fn columns() -> &'static [&'static str] {
    &["Name", "City", "Start Date"]
  }

  fn table_row(&self) -> Vec<String> {
    vec![self.name.clone(), self.city.clone(), Self::display_date(self.start_date)]
  }
}

impl Upvotable for FashionFest {
  fn voters(&self) -> &[VoterId] {
    &self.upvotes
  }
}

/// Calendar dates travel as `YYYY-MM-DD`; full RFC 3339 timestamps from the backend
/// are accepted and reduced to their UTC date.
mod calendar_date {
  use chrono::{DateTime, NaiveDate, Utc};
  use serde::{de, Deserialize, Deserializer, Serializer};

  const FORMAT: &str = "%Y-%m-%d";

  pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format(FORMAT).to_string())
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = NaiveDate::parse_from_str(&raw, FORMAT) {
      return Ok(date);
    }
    DateTime::parse_from_rfc3339(&raw)
      .map(|ts| ts.with_timezone(&Utc).date_naive())
      .map_err(|_| de::Error::custom(format!("invalid calendar date '{}'", raw)))
  }
}
