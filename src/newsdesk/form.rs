//! # Admin Post Form
//!
//! The editor is a small state machine:
//!
//! ```text
//!            fill                    submit (append)
//!   Idle ─────────────▶ Creating ─────────────────────▶ Idle
//!     │
//!     │ load_for_edit(post)          submit (replace by id)
//!     └─────────────────▶ Editing(id) ─────────────────▶ Idle
//! ```
//!
//! The form only holds state. Submitting goes through
//! [`crate::commands::submit`], which persists the post and calls
//! [`PostForm::reset`] on success.
//!
//! ## Image Selection
//!
//! [`PostForm::select_image`] validates a file and, if accepted, starts a
//! preview read. Reads complete later and in any order; each selection bumps
//! a generation counter and [`PostForm::apply_preview`] drops completions
//! from older selections.

use crate::commands::CmdMessage;
use crate::model::{Post, PostDraft};
use crate::upload::{self, CompletedPreview, FileBlob, PendingPreview};

pub const CREATE_LABEL: &str = "Publish Post";
pub const UPDATE_LABEL: &str = "Update Post";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Idle,
    Creating,
    Editing(i64),
}

#[derive(Debug, Default)]
pub struct PostForm {
    draft: PostDraft,
    editing_id: Option<i64>,
    selected: Option<FileBlob>,
    preview: Option<String>,
    generation: u64,
    status: Option<CmdMessage>,
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        match self.editing_id {
            Some(id) => FormMode::Editing(id),
            None if self.draft.is_empty() && self.selected.is_none() => FormMode::Idle,
            None => FormMode::Creating,
        }
    }

    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut PostDraft {
        &mut self.draft
    }

    /// Replace the field values, keeping any editing id.
    pub fn fill(&mut self, draft: PostDraft) {
        self.draft = draft;
    }

    /// Pre-fill from an existing post and record its id as the edit target.
    pub fn load_for_edit(&mut self, post: &Post) {
        self.reset();
        self.draft = PostDraft::from(post);
        self.editing_id = Some(post.id);
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing_id.is_some() {
            UPDATE_LABEL
        } else {
            CREATE_LABEL
        }
    }

    /// Validate and select a file. A rejected file is not kept and the
    /// rejection becomes the form status.
    pub fn select_image(&mut self, blob: FileBlob, max_bytes: u64) -> Option<PendingPreview> {
        self.generation += 1;
        self.preview = None;
        self.status = None;

        if let Err(rejection) = upload::validate(&blob, max_bytes) {
            self.selected = None;
            self.status = Some(CmdMessage::error(rejection.to_string()));
            return None;
        }

        self.selected = Some(blob.clone());
        Some(PendingPreview::new(self.generation, blob))
    }

    /// Apply a finished preview read. Returns false for a stale completion.
    pub fn apply_preview(&mut self, done: CompletedPreview) -> bool {
        if done.generation != self.generation || self.selected.is_none() {
            log::debug!(
                "dropping preview {} (current selection is {})",
                done.generation,
                self.generation
            );
            return false;
        }
        self.preview = Some(done.data_url);
        self.status = Some(CmdMessage::success(done.status));
        true
    }

    pub fn selected_file(&self) -> Option<&FileBlob> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn status(&self) -> Option<&CmdMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: CmdMessage) {
        self.status = Some(status);
    }

    /// Back to idle: fields cleared, no edit target, no selection.
    pub fn reset(&mut self) {
        let generation = self.generation;
        *self = Self::default();
        // Keep counting so late completions from before the reset stay stale.
        self.generation = generation;
    }
}
