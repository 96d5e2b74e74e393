use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;
use storefront_sync::{
  Cart, CatalogItem, Collection, CollectionCache, CollectionController, EndpointResolver, EndpointScope, MemoryRemote,
  Product, ResourceKind,
};
use tokio::runtime::Runtime; // To run async code within Criterion

// --- Fixtures ---
fn catalog(size: usize) -> Vec<CatalogItem> {
  (0..size)
    .map(|i| CatalogItem::new(format!("p{}", i), format!("Product {}", i), Decimal::new(100 + i as i64, 0)))
    .collect()
}

fn product_docs(size: usize) -> Vec<Value> {
  (0..size)
    .map(|i| {
      json!({ "_id": format!("p{}", i), "name": format!("Product {}", i), "price": 100 + i, "category": "Bench" })
    })
    .collect()
}

// --- Benchmark Functions ---

fn bench_cart_merge(c: &mut Criterion) {
  let mut group = c.benchmark_group("CartMerge");

  for distinct in [1usize, 10, 100].iter() {
    let items = catalog(*distinct);
    // Each item is added five times, so most adds hit the merge path.
    let adds = distinct * 5;
    group.throughput(Throughput::Elements(adds as u64));
    group.bench_with_input(BenchmarkId::from_parameter(distinct), distinct, |b, _| {
      b.iter(|| {
        let mut cart = Cart::new();
        for _round in 0..5 {
          for item in &items {
            cart = cart.add_item(item);
          }
        }
        criterion::black_box(cart.total_quantity())
      })
    });
  }
  group.finish();
}

fn bench_cache_replace_all(c: &mut Criterion) {
  let mut group = c.benchmark_group("CacheReplaceAll");

  for size in [10usize, 100, 1000].iter() {
    let listing: Vec<Product> = product_docs(*size)
      .into_iter()
      .map(|doc| serde_json::from_value(doc).unwrap())
      .collect();
    group.throughput(Throughput::Elements(*size as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
      b.iter_batched(
        || listing.clone(),
        |items| {
          let mut cache = CollectionCache::<Product>::new();
          criterion::black_box(cache.replace_all(items))
        },
        criterion::BatchSize::SmallInput,
      )
    });
  }
  group.finish();
}

fn bench_controller_list(c: &mut Criterion) {
  let mut group = c.benchmark_group("ControllerListMemoryRemote");
  let rt = Runtime::new().unwrap();
  let resolver = EndpointResolver::new("http://bench.local/api", EndpointScope::Admin);

  for size in [10usize, 100, 1000].iter() {
    let endpoint = resolver.resolve(ResourceKind::Products);
    let remote = Arc::new(MemoryRemote::new().with_collection(&endpoint, product_docs(*size)));
    let collection = Collection::<Product>::new();
    let controller = CollectionController::new(&resolver, remote, &collection);
    let controller = &controller;

    group.throughput(Throughput::Elements(*size as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
      b.to_async(&rt).iter(|| async move {
        let kept = controller.list().await.unwrap();
        criterion::black_box(kept)
      })
    });
  }
  group.finish();
}

criterion_group!(benches, bench_cart_merge, bench_cache_replace_all, bench_controller_list);
criterion_main!(benches);
