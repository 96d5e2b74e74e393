// storefront_sync/src/model/cart.rs

//! The local shopping cart. Lines are merged by product identity; every operation
//! returns a new `Cart` and leaves the receiver untouched.

use crate::error::{SyncError, SyncResult};
use crate::model::entity::EntityId;
use crate::model::product::Product;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{event, Level};

/// Currency every storefront price is quoted in.
pub const CURRENCY: &str = "INR";

/// A shop product as displayed in the catalog. Always carries an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
  pub id: EntityId,
  pub name: String,
  pub price: Decimal,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub original_price: Option<Decimal>,
  #[serde(default)]
  pub category: String,
  #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rating: Option<f32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reviews: Option<u32>,
}

impl CatalogItem {
  pub fn new(id: impl Into<EntityId>, name: impl Into<String>, price: Decimal) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      price,
      original_price: None,
      category: String::new(),
      image_url: None,
      rating: None,
      reviews: None,
    }
  }

  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = category.into();
    self
  }
}

impl TryFrom<&Product> for CatalogItem {
  type Error = SyncError;

  fn try_from(product: &Product) -> Result<Self, Self::Error> {
    let id = product
      .id
      .clone()
      .ok_or_else(|| SyncError::validation("_id", "Only saved products can be added to the bag."))?;
    Ok(CatalogItem {
      id,
      name: product.name.clone(),
      price: product.price,
      original_price: None,
      category: product.category.clone(),
      image_url: product.image_url.clone(),
      rating: None,
      reviews: None,
    })
  }
}

/// One cart line: a product identity, a quantity of at least one, and the display
/// fields captured when the product was first added.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub product_id: EntityId,
  pub name: String,
  pub price: Decimal,
  pub category: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
  quantity: u32,
}

impl CartLine {
  fn from_item(item: &CatalogItem) -> Self {
    Self {
      product_id: item.id.clone(),
      name: item.name.clone(),
      price: item.price,
      category: item.category.clone(),
      image_url: item.image_url.clone(),
      quantity: 1,
    }
  }

  pub fn quantity(&self) -> u32 {
    self.quantity
  }

  pub fn line_total(&self) -> Decimal {
    self.price * Decimal::from(self.quantity)
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Cart {
  lines: Vec<CartLine>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Merge-or-append: an existing line for the item's id gains one unit, otherwise a
  /// new line with quantity 1 is appended.
  pub fn add_item(&self, item: &CatalogItem) -> Cart {
    let mut lines = self.lines.clone();
    match lines.iter_mut().find(|line| line.product_id == item.id) {
      Some(line) => {
        line.quantity = line.quantity.saturating_add(1);
        event!(Level::DEBUG, product_id = %item.id, quantity = line.quantity, "Cart line quantity incremented.");
      }
      None => {
        lines.push(CartLine::from_item(item));
        event!(Level::DEBUG, product_id = %item.id, "Cart line appended.");
      }
    }
    Cart { lines }
  }

  pub fn remove_item(&self, product_id: &EntityId) -> Cart {
    Cart {
      lines: self
        .lines
        .iter()
        .filter(|line| &line.product_id != product_id)
        .cloned()
        .collect(),
    }
  }

  /// Sets a line's quantity; zero removes the line. Unknown ids leave the cart as is.
  pub fn set_quantity(&self, product_id: &EntityId, quantity: u32) -> Cart {
    if quantity == 0 {
      return self.remove_item(product_id);
    }
    let mut lines = self.lines.clone();
    if let Some(line) = lines.iter_mut().find(|line| &line.product_id == product_id) {
      line.quantity = quantity;
    }
    Cart { lines }
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn line(&self, product_id: &EntityId) -> Option<&CartLine> {
    self.lines.iter().find(|line| &line.product_id == product_id)
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Total units across all lines.
  pub fn total_quantity(&self) -> u64 {
    self.lines.iter().map(|line| u64::from(line.quantity)).sum()
  }

  pub fn subtotal(&self) -> Decimal {
    self.lines.iter().map(CartLine::line_total).sum()
  }

  /// Freezes the cart for the checkout collaborator.
  pub fn checkout_snapshot(&self) -> SyncResult<CheckoutSnapshot> {
    if self.is_empty() {
      return Err(SyncError::validation("cart", "Your bag is empty."));
    }
    let subtotal = self.subtotal();
    let amount_minor_units = (subtotal * Decimal::ONE_HUNDRED)
      .round()
      .to_i64()
      .ok_or_else(|| SyncError::validation("cart", "The bag total is too large to charge."))?;
    Ok(CheckoutSnapshot {
      lines: self.lines.clone(),
      subtotal,
      amount_minor_units,
      currency: CURRENCY,
    })
  }
}

/// A finalized cart handed to checkout. The amount is in minor units (paise).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSnapshot {
  pub lines: Vec<CartLine>,
  pub subtotal: Decimal,
  pub amount_minor_units: i64,
  pub currency: &'static str,
}
