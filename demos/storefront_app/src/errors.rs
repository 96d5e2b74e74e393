// demos/storefront_app/src/errors.rs

use storefront_sync::{Notice, Operation, SyncError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  /// A storefront operation failed; the notice is what the user sees.
  #[error("{notice}")]
  Failed {
    notice: Notice,
    #[source]
    source: SyncError,
  },

  #[error("Storefront Error: {0}")]
  Storefront(#[from] SyncError),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Input Error: {0}")]
  Input(String),

  #[error("I/O Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON Error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("HTTP Client Error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Internal Error: {0}")]
  Internal(String), // For miscellaneous errors
}

impl AppError {
  /// Wraps a failure of `operation` with its user-facing notice.
  pub fn during(operation: Operation) -> impl FnOnce(SyncError) -> AppError {
    move |source| AppError::Failed {
      notice: Notice::from_error(operation, &source),
      source,
    }
  }

  /// Process exit code for this failure.
  pub fn exit_code(&self) -> i32 {
    match self {
      AppError::Config(_) | AppError::Input(_) => 2,
      AppError::Failed { source, .. } | AppError::Storefront(source) if source.is_retryable() => 75,
      _ => 1,
    }
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<SyncError>() {
      Ok(sync) => AppError::Storefront(sync),
      Err(err) => AppError::Internal(format!("{:#}", err)),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
