// storefront_sync/src/error.rs
use crate::model::EntityId;
use anyhow::Error as AnyhowError;
use serde::Serialize;
use thiserror::Error;

/// A message tied to one submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }
}

/// Coarse classification of a failure, used by the error surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  /// Unknown resource kind. A programming defect, never a runtime condition.
  Configuration,
  /// No response was received from the backend.
  NetworkUnreachable,
  /// A response was received with a failure status (or could not be decoded).
  Server,
  /// The submitted payload was rejected, locally or by the backend.
  Validation,
  /// A credential is missing or was refused.
  Authorization,
  /// Another mutation on the same entity is still in flight.
  Conflict,
}

#[derive(Debug, Error)]
pub enum SyncError {
  #[error("Unknown resource kind: '{token}'")]
  Configuration { token: String },

  #[error("Backend unreachable. Source: {source}")]
  Network {
    #[source]
    source: AnyhowError,
  },

  #[error("Server responded with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
  Server { status: u16, message: Option<String> },

  #[error("Validation failed: {message}")]
  Validation { message: String, fields: Vec<FieldError> },

  #[error("Authorization required: {message}")]
  Authorization { message: String },

  #[error("A mutation for entity '{id}' is already in flight")]
  MutationInFlight { id: EntityId },
}

impl SyncError {
  /// Single-field validation failure.
  pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
    let field_error = FieldError::new(field, message);
    SyncError::Validation {
      message: field_error.message.clone(),
      fields: vec![field_error],
    }
  }

  /// Collects several field failures into one error. The first field's message leads.
  pub fn invalid_fields(fields: Vec<FieldError>) -> Self {
    let message = match fields.as_slice() {
      [] => "The submitted data is invalid.".to_string(),
      [only] => only.message.clone(),
      [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    };
    SyncError::Validation { message, fields }
  }

  pub fn unauthorized(message: impl Into<String>) -> Self {
    SyncError::Authorization {
      message: message.into(),
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      SyncError::Configuration { .. } => ErrorKind::Configuration,
      SyncError::Network { .. } => ErrorKind::NetworkUnreachable,
      SyncError::Server { .. } => ErrorKind::Server,
      SyncError::Validation { .. } => ErrorKind::Validation,
      SyncError::Authorization { .. } => ErrorKind::Authorization,
      SyncError::MutationInFlight { .. } => ErrorKind::Conflict,
    }
  }

  /// Message supplied by the backend (or by local validation), if any.
  pub fn reported_message(&self) -> Option<&str> {
    match self {
      SyncError::Server { message, .. } => message.as_deref(),
      SyncError::Validation { message, .. } => Some(message.as_str()),
      SyncError::Authorization { message } => Some(message.as_str()),
      _ => None,
    }
  }

  pub fn field_errors(&self) -> &[FieldError] {
    match self {
      SyncError::Validation { fields, .. } => fields,
      _ => &[],
    }
  }

  /// Whether repeating the same action unchanged can succeed.
  pub fn is_retryable(&self) -> bool {
    matches!(
      self,
      SyncError::Network { .. } | SyncError::Server { .. } | SyncError::MutationInFlight { .. }
    )
  }
}

pub type SyncResult<T, E = SyncError> = std::result::Result<T, E>;
