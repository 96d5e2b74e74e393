// storefront_sync/src/controller/mod.rs

//! The `CollectionController<R>`: its construction, list synchronization, create/update/
//! delete, upvote reconciliation, confirmation gates and the form edit session.

pub mod crud;
pub mod definition;
pub mod editing;
pub mod gate;
pub mod sync;
pub mod upvote;

pub use crud::{RemoveOutcome, SaveMode};
pub use definition::CollectionController;
pub use editing::{EditSession, EditState};
pub use gate::{ConfirmPrompt, ConfirmationGate, FunctionalGate, StaticGate};
