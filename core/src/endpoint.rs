// storefront_sync/src/endpoint.rs

//! Maps a resource kind to its remote collection address.

use crate::error::{SyncError, SyncResult};
use crate::model::EntityId;
use std::fmt;
use std::str::FromStr;

/// Resource kinds that have a remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
  Products,
  FashionFests,
}

impl ResourceKind {
  pub const ALL: [ResourceKind; 2] = [ResourceKind::Products, ResourceKind::FashionFests];

  /// Canonical token, as used by the admin panel tabs.
  pub fn token(self) -> &'static str {
    match self {
      ResourceKind::Products => "products",
      ResourceKind::FashionFests => "fashionfests",
    }
  }

  /// Last path segment of the collection address.
  pub fn collection_path(self) -> &'static str {
    match self {
      ResourceKind::Products => "products",
      ResourceKind::FashionFests => "fests",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      ResourceKind::Products => "Products",
      ResourceKind::FashionFests => "Fashion Fests",
    }
  }

  /// Singular noun for one entity of this kind.
  pub fn singular(self) -> &'static str {
    match self {
      ResourceKind::Products => "product",
      ResourceKind::FashionFests => "fest",
    }
  }
}

impl fmt::Display for ResourceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.token())
  }
}

impl FromStr for ResourceKind {
  type Err = SyncError;

  fn from_str(token: &str) -> Result<Self, Self::Err> {
    match token.trim().to_ascii_lowercase().as_str() {
      "products" => Ok(ResourceKind::Products),
      "fashionfests" | "fashion-fests" | "fests" => Ok(ResourceKind::FashionFests),
      _ => Err(SyncError::Configuration {
        token: token.to_string(),
      }),
    }
  }
}

/// Which side of the backend a resolver addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointScope {
  /// `{base}/admin/{collection}`: the back-office routes.
  #[default]
  Admin,
  /// `{base}/{collection}`: the public storefront routes.
  Public,
}

impl FromStr for EndpointScope {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value.trim().to_ascii_lowercase().as_str() {
      "admin" => Ok(EndpointScope::Admin),
      "public" => Ok(EndpointScope::Public),
      other => Err(format!("unknown endpoint scope '{}' (expected 'admin' or 'public')", other)),
    }
  }
}

#[derive(Debug, Clone)]
pub struct EndpointResolver {
  base_url: String,
  scope: EndpointScope,
}

impl EndpointResolver {
  pub fn new(base_url: impl Into<String>, scope: EndpointScope) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self { base_url, scope }
  }

  pub fn scope(&self) -> EndpointScope {
    self.scope
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn resolve(&self, kind: ResourceKind) -> Endpoint {
    let collection_url = match self.scope {
      EndpointScope::Admin => format!("{}/admin/{}", self.base_url, kind.collection_path()),
      EndpointScope::Public => format!("{}/{}", self.base_url, kind.collection_path()),
    };
    Endpoint { kind, collection_url }
  }

  /// Resolves a kind token. Unknown tokens are a `Configuration` error.
  pub fn resolve_token(&self, token: &str) -> SyncResult<Endpoint> {
    let kind = token.parse::<ResourceKind>()?;
    Ok(self.resolve(kind))
  }
}

/// Immutable address of one remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
  kind: ResourceKind,
  collection_url: String,
}

impl Endpoint {
  pub fn kind(&self) -> ResourceKind {
    self.kind
  }

  pub fn collection_url(&self) -> &str {
    &self.collection_url
  }

  pub fn member_url(&self, id: &EntityId) -> String {
    format!("{}/{}", self.collection_url, id)
  }

  pub fn upvote_url(&self, id: &EntityId) -> String {
    format!("{}/{}/upvote", self.collection_url, id)
  }
}
