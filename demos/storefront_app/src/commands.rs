// demos/storefront_app/src/commands.rs

//! One handler per CLI subcommand. Each handler drives the sync layer and prints the result.

use crate::errors::{AppError, Result as AppResult};
use crate::state::AppState;
use anyhow::Context;
use rust_decimal::Decimal;
use serde_json::Value;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use storefront_sync::stylist::request_recommendations;
use storefront_sync::{
  CatalogItem, Collection, CollectionController, ConfirmPrompt, ConfirmationGate, EndpointResolver, EndpointScope,
  EntityId, FashionFest, Notice, Occasion, Operation, Product, RemoveOutcome, ResourceKind, SaveMode, Season,
  Session, StaticGate, StyleRequest, Upvotable,
};
use tracing::{info, instrument, warn};

/// Asks on the terminal before a delete goes out. Needs the multi-threaded runtime.
pub struct StdinGate;

impl ConfirmationGate for StdinGate {
  fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
    tokio::task::block_in_place(|| ask(&prompt.message))
  }
}

fn ask(message: &str) -> bool {
  print!("{} [y/N] ", message);
  if io::stdout().flush().is_err() {
    return false;
  }
  let mut answer = String::new();
  match io::stdin().lock().read_line(&mut answer) {
    Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
    Err(e) => {
      warn!(error = %e, "Could not read confirmation; treating as declined.");
      false
    }
  }
}

fn parse_kind(token: &str) -> AppResult<ResourceKind> {
  token.parse::<ResourceKind>().map_err(AppError::Storefront)
}

fn render_table(state: &AppState, kind: ResourceKind) -> AppResult<()> {
  let columns = state.panel.columns(kind)?;
  let rows = state.panel.rows(kind)?;
  println!("{}", kind.label());
  println!("id\t{}", columns.join("\t"));
  for (id, cells) in rows {
    println!("{}\t{}", id, cells.join("\t"));
  }
  Ok(())
}

#[instrument(name = "cmd::list", skip(state))]
pub async fn list(state: &AppState, kind: &str) -> AppResult<()> {
  let kind = parse_kind(kind)?;
  let count = state
    .panel
    .switch_to(kind)
    .await
    .map_err(AppError::during(Operation::List(kind)))?;
  info!(count, "Listing loaded.");
  render_table(state, kind)
}

/// Reads a JSON form from `source`; `-` means standard input.
fn read_form(source: &str) -> AppResult<Value> {
  let raw = if source == "-" {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    buffer
  } else {
    std::fs::read_to_string(source)
      .with_context(|| format!("could not read form file '{}'", source))
      .map_err(AppError::from)?
  };
  let form: Value = serde_json::from_str(&raw)?;
  if !form.is_object() {
    return Err(AppError::Input("The form must be a JSON object.".to_string()));
  }
  Ok(form)
}

#[instrument(name = "cmd::save", skip(state))]
pub async fn save(state: &AppState, kind: &str, source: &str, id: Option<&str>) -> AppResult<()> {
  let kind = parse_kind(kind)?;
  let mut form = read_form(source)?;
  let mode = match id {
    Some(id) => {
      if let Value::Object(map) = &mut form {
        map.insert("_id".to_string(), Value::String(id.to_string()));
      }
      SaveMode::Update
    }
    None => SaveMode::Create,
  };

  // Updates match against the cached row, so load the listing first.
  if mode == SaveMode::Update {
    state
      .panel
      .switch_to(kind)
      .await
      .map_err(AppError::during(Operation::List(kind)))?;
  }

  let saved = state
    .panel
    .save(kind, form, mode, &state.session)
    .await
    .map_err(AppError::during(Operation::Save(kind, mode)))?;
  println!("Saved {}:", kind.singular());
  println!("{}", serde_json::to_string_pretty(&saved)?);
  Ok(())
}

#[instrument(name = "cmd::delete", skip(state))]
pub async fn delete(state: &AppState, kind: &str, id: &str, assume_yes: bool) -> AppResult<()> {
  let kind = parse_kind(kind)?;
  state
    .panel
    .switch_to(kind)
    .await
    .map_err(AppError::during(Operation::List(kind)))?;

  let id = EntityId::new(id);
  let approve = StaticGate::approve();
  let gate: &dyn ConfirmationGate = if assume_yes { &approve } else { &StdinGate };
  let outcome = state
    .panel
    .remove(kind, &id, gate, &state.session)
    .await
    .map_err(AppError::during(Operation::Remove(kind)))?;

  match outcome {
    RemoveOutcome::Removed => {
      println!("Deleted {} {}.", kind.singular(), id);
      render_table(state, kind)
    }
    RemoveOutcome::Declined => {
      println!("Nothing was deleted.");
      Ok(())
    }
  }
}

/// Upvotes go through the public routes whatever scope the panel uses.
#[instrument(name = "cmd::upvote", skip(state))]
pub async fn upvote(state: &AppState, id: &str) -> AppResult<()> {
  let resolver = EndpointResolver::new(state.resolver.base_url(), EndpointScope::Public);
  let fests = Collection::<FashionFest>::new();
  let controller = CollectionController::new(&resolver, state.remote.clone(), &fests);
  let operation = Operation::Upvote(ResourceKind::FashionFests);

  controller
    .list()
    .await
    .map_err(AppError::during(Operation::List(ResourceKind::FashionFests)))?;
  let fest = controller
    .upvote(&EntityId::new(id), &state.session)
    .await
    .map_err(AppError::during(operation))?;

  println!("{} now has {} upvote(s).", fest.name, fest.vote_count());
  Ok(())
}

#[instrument(name = "cmd::recommend", skip(state))]
pub async fn recommend(state: &AppState, image: &Path, season: &str, usage: &str) -> AppResult<()> {
  let season: Season = season.parse().map_err(AppError::during(Operation::Recommend))?;
  let occasion: Occasion = usage.parse().map_err(AppError::during(Operation::Recommend))?;

  let bytes = std::fs::read(image)
    .with_context(|| format!("could not read image '{}'", image.display()))
    .map_err(AppError::from)?;
  let file_name = image
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_else(|| "upload.jpg".to_string());

  let request = StyleRequest::new(bytes, file_name)
    .with_season(season)
    .with_occasion(occasion);
  let outfits = request_recommendations(state.stylist.as_ref(), &request)
    .await
    .map_err(AppError::during(Operation::Recommend))?;

  if outfits.is_empty() {
    println!("No outfits matched {} / {}.", season, occasion);
  }
  for (rank, outfit) in outfits.iter().enumerate() {
    let shown = if outfit.is_inline_image() {
      format!("inline image, {} characters", outfit.as_str().len())
    } else {
      outfit.as_str().to_string()
    };
    println!("{:>2}. {}", rank + 1, shown);
  }
  Ok(())
}

fn sample_catalog() -> Vec<CatalogItem> {
  vec![
    CatalogItem::new("demo-kurta", "Handloom Kurta", Decimal::new(1199, 0)).with_category("Ethnic"),
    CatalogItem::new("demo-sneakers", "Canvas Sneakers", Decimal::new(24995, 1)).with_category("Footwear"),
  ]
}

/// Loads the public product listing into a local catalog; falls back to a sample one.
async fn load_catalog(state: &AppState) -> Vec<CatalogItem> {
  let resolver = EndpointResolver::new(state.resolver.base_url(), EndpointScope::Public);
  let products = Collection::<Product>::new();
  let controller = CollectionController::new(&resolver, state.remote.clone(), &products);

  match controller.list().await {
    Ok(_) => {
      let items: Vec<CatalogItem> = products
        .read()
        .iter()
        .filter_map(|product| CatalogItem::try_from(product).ok())
        .collect();
      if items.is_empty() {
        sample_catalog()
      } else {
        items
      }
    }
    Err(e) => {
      let notice = Notice::from_error(Operation::List(ResourceKind::Products), &e);
      warn!(notice = %notice.message, "Using the sample catalog.");
      sample_catalog()
    }
  }
}

fn print_cart(session: &Session) {
  let cart = session.cart();
  for line in cart.lines() {
    println!(
      "{:<24} x{:<3} ₹{}",
      line.name,
      line.quantity(),
      line.line_total().normalize()
    );
  }
  println!("{} item(s), subtotal ₹{}", cart.total_quantity(), cart.subtotal().normalize());
}

#[instrument(name = "cmd::cart_demo", skip(state))]
pub async fn cart_demo(state: &AppState) -> AppResult<()> {
  let catalog = load_catalog(state).await;
  let session = Session::new();

  let first = catalog
    .first()
    .ok_or_else(|| AppError::Internal("The catalog is empty.".to_string()))?;
  session.add_to_cart(first);
  session.add_to_cart(first);
  if let Some(second) = catalog.get(1) {
    session.add_to_cart(second);
  }
  print_cart(&session);

  let snapshot = session
    .checkout_snapshot()
    .map_err(AppError::during(Operation::Checkout))?;
  println!("{}", serde_json::to_string_pretty(&snapshot)?);

  session.sign_out();
  println!("Signed out; bag has {} line(s).", session.cart().len());
  Ok(())
}
