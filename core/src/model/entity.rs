// storefront_sync/src/model/entity.rs

//! The `Resource` trait every synchronized entity kind implements, and the id newtype.

use crate::endpoint::ResourceKind;
use crate::error::{FieldError, SyncError, SyncResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Wire name of the server-assigned id.
pub const ID_FIELD: &str = "_id";

/// Server-assigned identifier, unique within one collection.
///
/// Serialized as a string; numeric ids sent by the backend are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
  pub fn new(id: impl Into<String>) -> Self {
    EntityId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for EntityId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for EntityId {
  fn from(value: &str) -> Self {
    EntityId(value.to_string())
  }
}

impl From<String> for EntityId {
  fn from(value: String) -> Self {
    EntityId(value)
  }
}

impl<'de> Deserialize<'de> for EntityId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
      Text(String),
      Unsigned(u64),
      Signed(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
      RawId::Text(text) => EntityId(text),
      RawId::Unsigned(n) => EntityId(n.to_string()),
      RawId::Signed(n) => EntityId(n.to_string()),
    })
  }
}

/// Identifier of a voter, as recorded by the backend.
pub type VoterId = String;

/// When a controller mutates its collection cache relative to the remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationPolicy {
  /// Mutate only after the server confirms, using the server's entity.
  #[default]
  ConfirmOnly,
  /// Pre-apply updates and removals, then commit the server entity or roll back.
  /// Creates stay confirm-only: a draft has no id to live under.
  Optimistic,
}

/// An entity kind synchronized with one remote collection.
pub trait Resource: Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
  const KIND: ResourceKind;

  /// Default mutation policy for controllers of this kind.
  const POLICY: MutationPolicy = MutationPolicy::ConfirmOnly;

  /// Whether create/update require a bearer token from the session.
  const WRITE_REQUIRES_AUTH: bool = false;

  /// The server-assigned id; `None` for drafts that were never created.
  fn id(&self) -> Option<&EntityId>;

  /// Local checks run before any request is issued.
  fn validate(&self) -> SyncResult<()> {
    Ok(())
  }

  /// Payload sent on create/update. The id travels in the URL, never in the body.
  fn write_payload(&self) -> SyncResult<Value> {
    let mut payload = serde_json::to_value(self).map_err(|e| SyncError::Validation {
      message: format!("Could not encode {}: {}", Self::KIND.singular(), e),
      fields: Vec::new(),
    })?;
    if let Value::Object(map) = &mut payload {
      map.remove(ID_FIELD);
    }
    Ok(payload)
  }

  /// Column headers for the admin table.
  fn columns() -> &'static [&'static str];

  /// One admin table row, aligned with `columns()`.
  fn table_row(&self) -> Vec<String>;
}

/// Kinds carrying a server-owned vote set.
pub trait Upvotable: Resource {
  fn voters(&self) -> &[VoterId];

  fn vote_count(&self) -> usize {
    self.voters().len()
  }
}

pub(crate) fn require_text(fields: &mut Vec<FieldError>, field: &str, label: &str, value: &str) {
  if value.trim().is_empty() {
    fields.push(FieldError::new(field, format!("{} is required.", label)));
  }
}
