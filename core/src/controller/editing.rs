// storefront_sync/src/controller/editing.rs

//! Form-level state for creating or editing one entity.

use crate::controller::{CollectionController, SaveMode};
use crate::error::{SyncError, SyncResult};
use crate::model::Resource;
use crate::session::Session;
use crate::surface::{Notice, Operation};
use tracing::{event, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
  Idle,
  Editing,
  Submitting,
  Committed,
}

/// Drives `Idle → Editing → Submitting → Committed`, falling back to `Editing` with a
/// [`Notice`] when a submit fails.
#[derive(Debug, Clone)]
pub struct EditSession<R: Resource> {
  state: EditState,
  mode: SaveMode,
  draft: Option<R>,
  notice: Option<Notice>,
}

impl<R: Resource> Default for EditSession<R> {
  fn default() -> Self {
    Self {
      state: EditState::Idle,
      mode: SaveMode::Create,
      draft: None,
      notice: None,
    }
  }
}

impl<R: Resource> EditSession<R> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> EditState {
    self.state
  }

  pub fn mode(&self) -> SaveMode {
    self.mode
  }

  pub fn draft(&self) -> Option<&R> {
    self.draft.as_ref()
  }

  /// Mutable access while editing; `None` in any other state.
  pub fn draft_mut(&mut self) -> Option<&mut R> {
    match self.state {
      EditState::Editing => self.draft.as_mut(),
      _ => None,
    }
  }

  /// The notice left by the last failed submit.
  pub fn notice(&self) -> Option<&Notice> {
    self.notice.as_ref()
  }

  pub fn begin_create(&mut self, draft: R) {
    self.enter(SaveMode::Create, draft);
  }

  /// Starts editing a copy of `entity`; the cached original is untouched until commit.
  pub fn begin_edit(&mut self, entity: &R) {
    self.enter(SaveMode::Update, entity.clone());
  }

  pub fn cancel(&mut self) {
    *self = Self::default();
  }

  fn enter(&mut self, mode: SaveMode, draft: R) {
    self.state = EditState::Editing;
    self.mode = mode;
    self.draft = Some(draft);
    self.notice = None;
  }

  /// Submits the draft through `controller`.
  ///
  /// Success clears the draft and returns the server's entity. Failure returns the error
  /// and leaves the session in `Editing` with the draft intact and a notice recorded.
  pub async fn submit(&mut self, controller: &CollectionController<R>, session: &Session) -> SyncResult<R> {
    let draft = match (self.state, self.draft.as_ref()) {
      (EditState::Editing, Some(draft)) => draft.clone(),
      (state, _) => {
        event!(Level::WARN, ?state, "Submit requested outside of an edit.");
        return Err(SyncError::validation("form", "There is nothing to submit."));
      }
    };

    self.state = EditState::Submitting;
    match controller.save(&draft, self.mode, session).await {
      Ok(saved) => {
        self.state = EditState::Committed;
        self.draft = None;
        self.notice = None;
        Ok(saved)
      }
      Err(error) => {
        self.notice = Some(Notice::from_error(Operation::Save(R::KIND, self.mode), &error));
        self.state = EditState::Editing;
        Err(error)
      }
    }
  }
}
