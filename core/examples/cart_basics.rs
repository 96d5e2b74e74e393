// storefront_sync/examples/cart_basics.rs

use rust_decimal::Decimal;
use storefront_sync::{BearerToken, CatalogItem, Notice, Operation, Session};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Cart Basics Example ---");

  let session = Session::new();

  // 1. Checkout of an empty bag is refused.
  if let Err(e) = session.checkout_snapshot() {
    info!("Empty bag: {}", Notice::from_error(Operation::Checkout, &e));
  }

  // 2. Adding the same product twice merges into one line.
  let kurta = CatalogItem::new("p1", "Kurta", Decimal::new(1199, 0)).with_category("Ethnic");
  let dupatta = CatalogItem::new("p3", "Dupatta", Decimal::new(499, 0)).with_category("Ethnic");
  session.add_to_cart(&kurta);
  session.add_to_cart(&kurta);
  let cart = session.add_to_cart(&dupatta);
  for line in cart.lines() {
    info!("{} x{} = ₹{}", line.name, line.quantity(), line.line_total());
  }

  // 3. Snapshot handed to the payment collaborator, in paise.
  let snapshot = session.checkout_snapshot()?;
  info!(
    "Checkout: {} lines, subtotal ₹{}, charge {} {} (minor units)",
    snapshot.lines.len(),
    snapshot.subtotal,
    snapshot.amount_minor_units,
    snapshot.currency
  );
  info!("Snapshot JSON: {}", serde_json::to_string(&snapshot)?);

  // 4. Logging out clears the bag along with the token.
  if let Some(token) = BearerToken::new("demo-token") {
    session.sign_in(token);
  }
  session.sign_out();
  info!("After sign-out the bag holds {} items.", session.cart().total_quantity());

  Ok(())
}
