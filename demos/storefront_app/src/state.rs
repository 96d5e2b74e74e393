// demos/storefront_app/src/state.rs

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{HttpRemote, HttpStylist};
use std::sync::Arc;
use storefront_sync::{AdminPanel, BearerToken, EndpointResolver, RemoteStore, Session, StylistService};

pub struct AppState {
  pub resolver: EndpointResolver,
  pub remote: Arc<dyn RemoteStore>,
  pub stylist: Arc<dyn StylistService>,
  pub panel: AdminPanel,
  pub session: Session,
}

impl AppState {
  pub fn build(config: &AppConfig) -> Result<Self> {
    let http = HttpRemote::new(config.http_timeout)?;
    let stylist = HttpStylist::new(http.client().clone(), config.stylist_url.clone());
    let remote: Arc<dyn RemoteStore> = Arc::new(http);

    let resolver = EndpointResolver::new(config.api_base_url.clone(), config.scope);
    let panel = AdminPanel::with_defaults(&resolver, remote.clone());

    let session = Session::new();
    if let Some(token) = config.auth_token.clone().and_then(BearerToken::new) {
      session.sign_in(token);
    }

    Ok(Self {
      resolver,
      remote,
      stylist: Arc::new(stylist),
      panel,
      session,
    })
  }
}
