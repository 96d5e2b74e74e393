// demos/storefront_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use storefront_sync::EndpointScope;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_STYLIST_URL: &str = "http://localhost:8001/api/stylist/";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub api_base_url: String,
  pub stylist_url: String,
  /// Bearer token issued by the login flow, if the user is signed in.
  pub auth_token: Option<String>,
  pub http_timeout: Duration,
  pub scope: EndpointScope,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|value| !value.trim().is_empty());

    let api_base_url = get_env("STOREFRONT_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let stylist_url = get_env("STOREFRONT_STYLIST_URL").unwrap_or_else(|| DEFAULT_STYLIST_URL.to_string());
    for (name, url) in [("STOREFRONT_API_BASE_URL", &api_base_url), ("STOREFRONT_STYLIST_URL", &stylist_url)] {
      if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::Config(format!("{} must be an http(s) URL, got '{}'", name, url)));
      }
    }

    let auth_token = get_env("STOREFRONT_AUTH_TOKEN");

    let timeout_secs = match get_env("STOREFRONT_HTTP_TIMEOUT_SECS") {
      Some(raw) => raw
        .trim()
        .parse::<u64>()
        .map_err(|e| AppError::Config(format!("Invalid STOREFRONT_HTTP_TIMEOUT_SECS: {}", e)))?,
      None => DEFAULT_TIMEOUT_SECS,
    };
    if timeout_secs == 0 {
      return Err(AppError::Config("STOREFRONT_HTTP_TIMEOUT_SECS must be at least 1".to_string()));
    }

    let scope = match get_env("STOREFRONT_SCOPE") {
      Some(raw) => raw.parse::<EndpointScope>().map_err(AppError::Config)?,
      None => EndpointScope::default(),
    };

    tracing::info!(
      api_base_url = %api_base_url,
      stylist_url = %stylist_url,
      signed_in = auth_token.is_some(),
      timeout_secs,
      scope = ?scope,
      "Application configuration loaded."
    );

    Ok(Self {
      api_base_url,
      stylist_url,
      auth_token,
      http_timeout: Duration::from_secs(timeout_secs),
      scope,
    })
  }
}
