// storefront_sync/src/controller/gate.rs

//! Confirmation before destructive operations.

use crate::endpoint::ResourceKind;
use crate::model::EntityId;
use std::fmt;

/// What the user is asked before a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
  pub kind: ResourceKind,
  pub id: EntityId,
  pub message: String,
}

impl ConfirmPrompt {
  pub fn delete(kind: ResourceKind, id: &EntityId) -> Self {
    Self {
      kind,
      id: id.clone(),
      message: format!("Are you sure you want to delete this {}?", kind.singular()),
    }
  }
}

/// Decides whether a destructive operation may proceed.
pub trait ConfirmationGate: Send + Sync {
  fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// A gate with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticGate {
  approve: bool,
}

impl StaticGate {
  pub fn approve() -> Self {
    Self { approve: true }
  }

  pub fn decline() -> Self {
    Self { approve: false }
  }
}

impl ConfirmationGate for StaticGate {
  fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
    self.approve
  }
}

/// A gate backed by a closure, e.g. an interactive prompt.
pub struct FunctionalGate<F>
where
  F: Fn(&ConfirmPrompt) -> bool + Send + Sync,
{
  decide: F,
}

impl<F> FunctionalGate<F>
where
  F: Fn(&ConfirmPrompt) -> bool + Send + Sync,
{
  pub fn new(decide: F) -> Self {
    Self { decide }
  }
}

impl<F> ConfirmationGate for FunctionalGate<F>
where
  F: Fn(&ConfirmPrompt) -> bool + Send + Sync,
{
  fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
    (self.decide)(prompt)
  }
}

impl<F> fmt::Debug for FunctionalGate<F>
where
  F: Fn(&ConfirmPrompt) -> bool + Send + Sync,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FunctionalGate").finish_non_exhaustive()
  }
}
