// storefront_sync/examples/admin_panel.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use storefront_sync::{
  AdminPanel, BearerToken, EndpointResolver, EndpointScope, EntityId, FashionFest, MemoryRemote, Notice, Operation,
  Product, ResourceKind, SaveMode, Session, StaticGate,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Admin Panel Example ---");

  // 1. An in-process backend seeded with one product.
  let resolver = EndpointResolver::new("http://localhost:8000/api", EndpointScope::Admin);
  let remote = Arc::new(MemoryRemote::new().with_collection(
    &resolver.resolve(ResourceKind::Products),
    vec![json!({ "_id": "p1", "name": "Kurta", "price": 1199, "category": "Ethnic" })],
  ));
  remote.seed(&resolver.resolve(ResourceKind::FashionFests), Vec::new());

  // 2. One panel, one tab per kind.
  let panel = AdminPanel::with_defaults(&resolver, remote.clone());
  let session = Session::new();
  panel.switch_to(ResourceKind::Products).await?;

  // 3. Create a product through a typed controller.
  let products = panel.controller::<Product>()?;
  let saree = products
    .save(&Product::draft("Silk Saree", Decimal::new(4999, 0), "Ethnic"), SaveMode::Create, &session)
    .await?;
  info!("Created product {:?}", saree.id);

  // 4. A fest write without a token is refused locally.
  let fest = FashionFest::draft(
    "Lakme Week",
    "Jio World Centre",
    "Mumbai",
    NaiveDate::from_ymd_opt(2025, 1, 5).ok_or("bad date")?,
    NaiveDate::from_ymd_opt(2025, 1, 7).ok_or("bad date")?,
    "27ABCDE1234F1Z5",
  )
  .with_description("Winter/festive runway week");
  let fests = panel.controller::<FashionFest>()?;
  if let Err(e) = fests.save(&fest, SaveMode::Create, &session).await {
    error!("{}", Notice::from_error(Operation::Save(ResourceKind::FashionFests, SaveMode::Create), &e));
  }
  if let Some(token) = BearerToken::new("admin-token") {
    session.sign_in(token);
  }
  fests.save(&fest, SaveMode::Create, &session).await?;

  // 5. Delete with confirmation, then render both tabs.
  panel
    .remove(ResourceKind::Products, &EntityId::from("p1"), &StaticGate::approve(), &session)
    .await?;

  for kind in panel.kinds() {
    panel.switch_to(kind).await?;
    info!("== {} ==  {}", kind.label(), panel.columns(kind)?.join(" | "));
    for (id, row) in panel.rows(kind)? {
      info!("{:>8}  {}", id, row.join(" | "));
    }
  }

  info!("Backend received {} requests.", remote.request_count());
  Ok(())
}
