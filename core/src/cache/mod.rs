pub mod collection;
pub mod handle;

pub use collection::CollectionCache;
pub use handle::{Collection, WeakCollection};
