// storefront_sync/src/model/product.rs

use crate::endpoint::ResourceKind;
use crate::error::{FieldError, SyncError, SyncResult};
use crate::model::entity::{require_text, EntityId, Resource};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
  pub id: Option<EntityId>,
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price: Decimal,
  #[serde(default)]
  pub category: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
  /// Server-derived fields the client does not model, kept verbatim.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Product {
  pub fn draft(name: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      price,
      category: category.into(),
      ..Default::default()
    }
  }
}

impl Resource for Product {
  const KIND: ResourceKind = ResourceKind::Products;

  fn id(&self) -> Option<&EntityId> {
    self.id.as_ref()
  }

  fn validate(&self) -> SyncResult<()> {
    let mut fields = Vec::new();
    require_text(&mut fields, "name", "Name", &self.name);
    if self.price < Decimal::ZERO {
      fields.push(FieldError::new("price", "Price cannot be negative."));
    }
    if let Some(url) = self.image_url.as_deref().filter(|u| !u.is_empty()) {
      if !(url.starts_with("http://") || url.starts_with("https://")) {
        fields.push(FieldError::new("imageUrl", "Image URL must start with http:// or https://."));
      }
    }
    if fields.is_empty() {
      Ok(())
    } else {
      Err(SyncError::invalid_fields(fields))
    }
  }

  fn columns() -> &'static [&'static str] {
    &["Name", "Category", "Price"]
  }

  fn table_row(&self) -> Vec<String> {
    vec![self.name.clone(), self.category.clone(), format!("₹{}", self.price)]
  }
}
