// tests/cart_tests.rs
mod common;

use common::*;
use rust_decimal::Decimal;
use storefront_sync::{Cart, CatalogItem, EntityId, ErrorKind, Product, Session};

#[test]
fn test_adding_same_item_twice_merges_into_one_line() {
  setup_tracing();
  let kurta = kurta_item();

  let cart = Cart::new().add_item(&kurta).add_item(&kurta);

  assert_eq!(cart.len(), 1);
  let line = &cart.lines()[0];
  assert_eq!(line.product_id, EntityId::from("p1"));
  assert_eq!(line.quantity(), 2);
  assert_eq!(cart.total_quantity(), 2);
}

#[test]
fn test_adding_new_item_appends_and_keeps_prior_lines() {
  setup_tracing();
  let kurta = kurta_item();
  let saree = CatalogItem::new("p7", "Silk Saree", Decimal::new(4999, 0));

  let before = Cart::new().add_item(&kurta).add_item(&kurta);
  let after = before.add_item(&saree);

  assert_eq!(after.len(), before.len() + 1);
  assert_eq!(&after.lines()[..before.len()], before.lines());
  assert_eq!(after.lines()[1].quantity(), 1);
  assert_eq!(after.total_quantity(), before.total_quantity() + 1);
}

#[test]
fn test_add_item_leaves_receiver_untouched() {
  let kurta = kurta_item();
  let original = Cart::new().add_item(&kurta);
  let snapshot = original.clone();

  let _next = original.add_item(&kurta);

  assert_eq!(original, snapshot);
  assert_eq!(original.line(&EntityId::from("p1")).unwrap().quantity(), 1);
}

#[test]
fn test_every_add_grows_total_units_by_exactly_one() {
  let items = [
    kurta_item(),
    CatalogItem::new("p2", "Sneakers", Decimal::new(24995, 1)),
    kurta_item(),
    CatalogItem::new(EntityId::new("p3"), "Dupatta", Decimal::new(499, 0)),
    CatalogItem::new("p2", "Sneakers", Decimal::new(24995, 1)),
  ];

  let mut cart = Cart::new();
  for item in &items {
    let next = cart.add_item(item);
    assert_eq!(next.total_quantity(), cart.total_quantity() + 1);
    cart = next;
  }

  assert_eq!(cart.len(), 3);
  let mut ids: Vec<_> = cart.lines().iter().map(|line| line.product_id.clone()).collect();
  ids.dedup();
  assert_eq!(ids.len(), 3, "no duplicate identities");
}

#[test]
fn test_set_quantity_and_remove() {
  let kurta = kurta_item();
  let dupatta = CatalogItem::new("p3", "Dupatta", Decimal::new(499, 0));
  let cart = Cart::new().add_item(&kurta).add_item(&dupatta);

  let bumped = cart.set_quantity(&EntityId::from("p3"), 4);
  assert_eq!(bumped.line(&EntityId::from("p3")).unwrap().quantity(), 4);
  assert_eq!(bumped.total_quantity(), 5);

  let zeroed = bumped.set_quantity(&EntityId::from("p3"), 0);
  assert_eq!(zeroed.len(), 1);

  let unknown = zeroed.set_quantity(&EntityId::from("nope"), 3);
  assert_eq!(unknown, zeroed);

  let emptied = zeroed.remove_item(&EntityId::from("p1"));
  assert!(emptied.is_empty());
}

#[test]
fn test_checkout_snapshot_totals_in_paise() {
  let kurta = kurta_item();
  let sneakers = CatalogItem::new("p2", "Sneakers", Decimal::new(24995, 1));
  let cart = Cart::new().add_item(&kurta).add_item(&kurta).add_item(&sneakers);

  let snapshot = cart.checkout_snapshot().unwrap();

  assert_eq!(snapshot.subtotal, Decimal::new(48975, 1));
  assert_eq!(snapshot.amount_minor_units, 489_750);
  assert_eq!(snapshot.currency, "INR");
  assert_eq!(snapshot.lines.len(), 2);
}

#[test]
fn test_checkout_of_empty_cart_is_rejected() {
  let err = Cart::new().checkout_snapshot().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(err.field_errors()[0].field, "cart");
}

#[test]
fn test_catalog_item_from_product_requires_saved_id() {
  let mut product = Product::draft("Kurta", Decimal::new(1199, 0), "Ethnic");
  assert!(CatalogItem::try_from(&product).is_err());

  product.id = Some(EntityId::from("p1"));
  let item = CatalogItem::try_from(&product).unwrap();
  assert_eq!(item.id, EntityId::from("p1"));
  assert_eq!(item.category, "Ethnic");
}

#[test]
fn test_catalog_item_reads_shop_listing_shape() {
  let item: CatalogItem = serde_json::from_value(serde_json::json!({
    "id": 4,
    "name": "Anarkali",
    "price": 2599,
    "originalPrice": 3299,
    "image": "https://cdn.shop.test/anarkali.jpg",
    "rating": 4.5,
    "reviews": 128,
    "category": "Ethnic"
  }))
  .unwrap();

  assert_eq!(item.id, EntityId::from("4"));
  assert_eq!(item.original_price, Some(Decimal::new(3299, 0)));
  assert_eq!(item.image_url.as_deref(), Some("https://cdn.shop.test/anarkali.jpg"));
  assert_eq!(item.reviews, Some(128));
}

#[test]
fn test_session_cart_is_cleared_on_sign_out() {
  let session = signed_in("token-a");
  session.add_to_cart(&kurta_item());
  session.add_to_cart(&kurta_item());
  assert_eq!(session.cart().total_quantity(), 2);

  session.sign_out();

  assert!(!session.is_authenticated());
  assert!(session.cart().is_empty());
  assert!(Session::new().checkout_snapshot().is_err());
}

#[test]
fn test_session_cart_passthroughs_replace_the_held_cart() {
  let session = Session::new();
  let sneakers = CatalogItem::new("p2", "Sneakers", Decimal::new(24995, 1)).with_category("Footwear");
  session.add_to_cart(&kurta_item());
  session.add_to_cart(&sneakers);

  let cart = session.set_cart_quantity(&EntityId::from("p2"), 3);
  assert_eq!(cart.line(&EntityId::from("p2")).map(|line| line.quantity()), Some(3));
  assert_eq!(session.cart(), cart);

  let cart = session.remove_from_cart(&EntityId::from("p1"));
  assert_eq!(cart.len(), 1);
  assert_eq!(session.cart().total_quantity(), 3);

  let cart = session.set_cart_quantity(&EntityId::from("p2"), 0);
  assert!(cart.is_empty());
  assert!(session.cart().is_empty());
}
