// demos/storefront_app/src/services/mod.rs

pub mod http_remote;
pub mod stylist_client;

pub use http_remote::HttpRemote;
pub use stylist_client::HttpStylist;
