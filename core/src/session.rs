// storefront_sync/src/session.rs

//! Explicit per-user session: the bearer token issued by the authentication collaborator
//! and the local cart. One `Session` is created at start-up and cleared at logout.

use crate::error::{SyncError, SyncResult};
use crate::model::{Cart, CatalogItem, CheckoutSnapshot, EntityId};
use parking_lot::RwLock;
use std::fmt;
use tracing::{event, Level};

/// Opaque credential attached as `Authorization: Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
  /// Returns `None` for blank input; an empty token is the same as no token.
  pub fn new(token: impl Into<String>) -> Option<Self> {
    let token = token.into();
    let trimmed = token.trim();
    if trimmed.is_empty() {
      None
    } else {
      Some(BearerToken(trimmed.to_string()))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn header_value(&self) -> String {
    format!("Bearer {}", self.0)
  }
}

impl fmt::Debug for BearerToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("BearerToken([REDACTED])")
  }
}

#[derive(Debug, Default)]
pub struct Session {
  token: RwLock<Option<BearerToken>>,
  cart: RwLock<Cart>,
}

impl Session {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_token(token: BearerToken) -> Self {
    let session = Self::new();
    session.sign_in(token);
    session
  }

  pub fn sign_in(&self, token: BearerToken) {
    *self.token.write() = Some(token);
    event!(Level::INFO, "Session signed in.");
  }

  /// Clears the token and the cart.
  pub fn sign_out(&self) {
    *self.token.write() = None;
    *self.cart.write() = Cart::new();
    event!(Level::INFO, "Session signed out; token and cart cleared.");
  }

  pub fn token(&self) -> Option<BearerToken> {
    self.token.read().clone()
  }

  pub fn is_authenticated(&self) -> bool {
    self.token.read().is_some()
  }

  /// The token, or an `Authorization` error naming the refused action.
  pub fn require_token(&self, action: &str) -> SyncResult<BearerToken> {
    self.token().ok_or_else(|| {
      event!(Level::WARN, action, "Action requires a signed-in session.");
      SyncError::unauthorized(format!("You must be logged in to {}.", action))
    })
  }

  pub fn cart(&self) -> Cart {
    self.cart.read().clone()
  }

  pub fn add_to_cart(&self, item: &CatalogItem) -> Cart {
    let mut cart = self.cart.write();
    *cart = cart.add_item(item);
    cart.clone()
  }

  pub fn remove_from_cart(&self, product_id: &EntityId) -> Cart {
    let mut cart = self.cart.write();
    *cart = cart.remove_item(product_id);
    cart.clone()
  }

  pub fn set_cart_quantity(&self, product_id: &EntityId, quantity: u32) -> Cart {
    let mut cart = self.cart.write();
    *cart = cart.set_quantity(product_id, quantity);
    cart.clone()
  }

  pub fn checkout_snapshot(&self) -> SyncResult<CheckoutSnapshot> {
    self.cart.read().checkout_snapshot()
  }
}
