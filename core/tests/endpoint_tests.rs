// tests/endpoint_tests.rs
use storefront_sync::{EndpointResolver, EndpointScope, EntityId, ErrorKind, ResourceKind};

#[test]
fn test_kind_tokens_parse() {
  assert_eq!("products".parse::<ResourceKind>().unwrap(), ResourceKind::Products);
  assert_eq!("fashionfests".parse::<ResourceKind>().unwrap(), ResourceKind::FashionFests);
  assert_eq!("Fashion-Fests".parse::<ResourceKind>().unwrap(), ResourceKind::FashionFests);
  assert_eq!("fests".parse::<ResourceKind>().unwrap(), ResourceKind::FashionFests);

  let err = "orders".parse::<ResourceKind>().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Configuration);
  assert!(!err.is_retryable());
}

#[test]
fn test_admin_scope_addresses() {
  let resolver = EndpointResolver::new("http://localhost:8000/api/", EndpointScope::Admin);
  let products = resolver.resolve(ResourceKind::Products);
  let fests = resolver.resolve(ResourceKind::FashionFests);
  let id = EntityId::from("65a1f0");

  assert_eq!(resolver.base_url(), "http://localhost:8000/api");
  assert_eq!(products.collection_url(), "http://localhost:8000/api/admin/products");
  assert_eq!(products.member_url(&id), "http://localhost:8000/api/admin/products/65a1f0");
  assert_eq!(fests.collection_url(), "http://localhost:8000/api/admin/fests");
  assert_eq!(fests.kind(), ResourceKind::FashionFests);
}

#[test]
fn test_public_scope_addresses() {
  let resolver = EndpointResolver::new("http://localhost:8000/api", EndpointScope::Public);
  let fests = resolver.resolve_token("fests").unwrap();

  assert_eq!(fests.collection_url(), "http://localhost:8000/api/fests");
  assert_eq!(fests.upvote_url(&EntityId::from("f1")), "http://localhost:8000/api/fests/f1/upvote");
  assert!(resolver.resolve_token("orders").is_err());
}

#[test]
fn test_scope_parse() {
  assert_eq!("ADMIN".parse::<EndpointScope>().unwrap(), EndpointScope::Admin);
  assert_eq!("public".parse::<EndpointScope>().unwrap(), EndpointScope::Public);
  assert!("internal".parse::<EndpointScope>().is_err());
  assert_eq!(EndpointScope::default(), EndpointScope::Admin);
}

#[test]
fn test_numeric_ids_are_kept_as_text() {
  let id: EntityId = serde_json::from_value(serde_json::json!(42)).unwrap();
  assert_eq!(id.as_str(), "42");
  assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("42"));
}
