// storefront_sync/src/model/mod.rs

//! Entities synchronized with the backend, and the local-only cart.

pub mod cart;
pub mod entity;
pub mod fest;
pub mod product;

pub use cart::{Cart, CartLine, CatalogItem, CheckoutSnapshot};
pub use entity::{EntityId, MutationPolicy, Resource, Upvotable, VoterId};
pub use fest::FashionFest;
pub use product::Product;
