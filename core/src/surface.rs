// storefront_sync/src/surface.rs

//! Turns any `SyncError` into exactly one user-facing notice.

use crate::controller::SaveMode;
use crate::endpoint::ResourceKind;
use crate::error::{ErrorKind, FieldError, SyncError};
use serde::Serialize;
use std::fmt;

/// The user action a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  List(ResourceKind),
  Save(ResourceKind, SaveMode),
  Remove(ResourceKind),
  Upvote(ResourceKind),
  Recommend,
  Checkout,
}

impl Operation {
  /// Message shown when nothing more specific is known.
  pub fn fallback_message(&self) -> String {
    match self {
      Operation::List(kind) => format!("Failed to fetch {}.", kind.token()),
      Operation::Save(ResourceKind::Products, _) => "Failed to save item.".to_string(),
      Operation::Save(kind, mode) => format!("Failed to {} {}. Please try again.", mode.verb(), kind.singular()),
      Operation::Remove(ResourceKind::Products) => "Failed to delete item.".to_string(),
      Operation::Remove(kind) => format!("Failed to delete {}.", kind.singular()),
      Operation::Upvote(kind) => format!("Failed to upvote {}.", kind.singular()),
      Operation::Recommend => "An error occurred while fetching recommendations.".to_string(),
      Operation::Checkout => "Unable to start checkout.".to_string(),
    }
  }

  fn kind(&self) -> Option<ResourceKind> {
    match self {
      Operation::List(kind) | Operation::Save(kind, _) | Operation::Remove(kind) | Operation::Upvote(kind) => {
        Some(*kind)
      }
      Operation::Recommend | Operation::Checkout => None,
    }
  }

  fn sign_in_message(&self) -> String {
    match self {
      Operation::Save(kind, _) => format!("You must be logged in to create or edit a {}.", kind.singular()),
      Operation::Upvote(_) => "You must be logged in to upvote.".to_string(),
      Operation::Remove(kind) => format!("You must be logged in to delete a {}.", kind.singular()),
      _ => "You must be logged in to continue.".to_string(),
    }
  }
}

/// A user-facing failure notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
  #[serde(skip)]
  pub operation: Operation,
  #[serde(skip)]
  pub kind: ErrorKind,
  pub message: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub fields: Vec<FieldError>,
}

impl Notice {
  pub fn from_error(operation: Operation, error: &SyncError) -> Self {
    let fallback = operation.fallback_message();
    let message = match error {
      SyncError::Network { .. } => format!("{} The server could not be reached.", fallback),
      // Upvote failures always read the same way, whatever the server said.
      SyncError::Server { .. } if matches!(operation, Operation::Upvote(_)) => fallback,
      SyncError::Server { message, .. } => non_blank(message.as_deref()).unwrap_or(fallback),
      SyncError::Validation { message, .. } => non_blank(Some(message)).unwrap_or(fallback),
      SyncError::Authorization { .. } => operation.sign_in_message(),
      SyncError::Configuration { token } => format!("Unknown section '{}'. {}", token, fallback),
      SyncError::MutationInFlight { .. } => {
        let noun = operation.kind().map(ResourceKind::singular).unwrap_or("item");
        format!("This {} is still being saved. Please wait.", noun)
      }
    };

    Notice {
      operation,
      kind: error.kind(),
      message,
      fields: error.field_errors().to_vec(),
    }
  }

  /// Message for one field, if the failure named it.
  pub fn field_message(&self, field: &str) -> Option<&str> {
    self
      .fields
      .iter()
      .find(|f| f.field == field)
      .map(|f| f.message.as_str())
  }
}

impl fmt::Display for Notice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message)?;
    for field in &self.fields {
      write!(f, "\n  {}: {}", field.field, field.message)?;
    }
    Ok(())
  }
}

fn non_blank(message: Option<&str>) -> Option<String> {
  message.map(str::trim).filter(|m| !m.is_empty()).map(str::to_string)
}
