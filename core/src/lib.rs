// storefront_sync/src/lib.rs

//! storefront-sync: client-side resource synchronization for a storefront.
//!
//! The crate keeps local, observable snapshots of remote collections consistent with the
//! authoritative backend:
//!  - A cart merge engine that accumulates quantities by product identity.
//!  - Kind-bound CRUD controllers with an explicit mutation policy per resource kind
//!    (confirm-only, or optimistic with rollback on failure).
//!  - An upvote reconciler that always adopts the server's returned entity.
//!  - An error surface that turns every failure into one user-facing notice.
//!  - An admin panel registry that dispatches list/save/remove by `ResourceKind`.
//!
//! Transport is abstracted behind the [`RemoteStore`] trait; [`MemoryRemote`] implements
//! the same contract in-process.

pub mod cache;
pub mod controller;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod registry;
pub mod remote;
pub mod session;
pub mod stylist;
pub mod surface;

// --- Re-exports for the Public API ---

pub use crate::cache::{Collection, CollectionCache, WeakCollection};
pub use crate::controller::{
  CollectionController, ConfirmPrompt, ConfirmationGate, EditSession, EditState, FunctionalGate, RemoveOutcome,
  SaveMode, StaticGate,
};
pub use crate::endpoint::{Endpoint, EndpointResolver, EndpointScope, ResourceKind};
pub use crate::error::{ErrorKind, FieldError, SyncError, SyncResult};
pub use crate::model::{
  Cart, CartLine, CatalogItem, CheckoutSnapshot, EntityId, FashionFest, MutationPolicy, Product, Resource, Upvotable,
};
pub use crate::registry::{AdminPanel, PanelRow};
pub use crate::remote::{MemoryRemote, Method, RemoteFailure, RemoteRequest, RemoteResponse, RemoteStore};
pub use crate::session::{BearerToken, Session};
pub use crate::stylist::{Occasion, Recommendation, Season, StyleRequest, StylistService};
pub use crate::surface::{Notice, Operation};

/*
    Typical wiring:
    1. Build an `EndpointResolver` from the API base URL and scope (admin or public).
    2. Pick a `RemoteStore` (HTTP in an application, `MemoryRemote` in tests).
    3. Create an `AdminPanel` and register each resource kind, or create a
       `Collection<R>` and a `CollectionController<R>` directly for a single view.
    4. Create one `Session` at start-up; `sign_in` when a token is issued, `sign_out` at logout.
    5. Drive the controller from UI events; render from the `Collection<R>` handle.
*/
