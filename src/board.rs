//! Client-side state for the comment board.
//!
//! [`CommentBoard`] owns the local snapshot of comments plus the two text
//! buffers (compose and edit draft). Every operation awaits exactly one
//! request and then folds the outcome into local state; failures collapse
//! into one fixed banner string and the cause is logged.

use tracing::{debug, error};

use crate::client::{ClientError, CommentApi, HttpCommentApi};
use crate::models::{Comment, Id, NewComment, PatchComment, UpdateComment};

pub const FETCH_FAILED: &str = "Failed to fetch comments";
pub const ADD_FAILED: &str = "Failed to add comment";
pub const UPDATE_FAILED: &str = "Failed to update comment";
pub const DELETE_FAILED: &str = "Failed to delete comment";
pub const LIKE_FAILED: &str = "Failed to like comment";

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this comment?";

/// Interactive yes/no gate used before destructive operations.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool { self(prompt) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: Id,
    pub draft: String,
}

pub struct CommentBoard<A = HttpCommentApi> {
    api: A,
    comments: Vec<Comment>,
    compose: String,
    editing: Option<EditState>,
    loading: bool,
    error: Option<String>,
}

impl CommentBoard<HttpCommentApi> {
    pub fn from_env() -> Self { Self::new(HttpCommentApi::from_env()) }
}

impl<A: CommentApi> CommentBoard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            comments: Vec::new(),
            compose: String::new(),
            editing: None,
            loading: false,
            error: None,
        }
    }

    pub fn api(&self) -> &A { &self.api }
    pub fn comments(&self) -> &[Comment] { &self.comments }
    pub fn comment(&self, id: Id) -> Option<&Comment> { self.comments.iter().find(|c| c.id == id) }
    pub fn compose(&self) -> &str { &self.compose }
    pub fn editing(&self) -> Option<&EditState> { self.editing.as_ref() }
    pub fn is_loading(&self) -> bool { self.loading }
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }

    pub fn set_compose(&mut self, text: impl Into<String>) { self.compose = text.into(); }

    /// Replaces the draft of the comment under edit; ignored outside edit mode.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(edit) = self.editing.as_mut() {
            edit.draft = text.into();
        }
    }

    fn fail(&mut self, msg: &str, cause: ClientError) {
        error!("{msg}: {cause}");
        self.error = Some(msg.to_string());
    }

    fn replace(&mut self, updated: Comment) {
        if let Some(slot) = self.comments.iter_mut().find(|c| c.id == updated.id) {
            *slot = updated;
        }
    }

    pub async fn load_comments(&mut self) {
        self.loading = true;
        match self.api.list().await {
            Ok(comments) => {
                debug!(count = comments.len(), "comments loaded");
                self.comments = comments;
                self.error = None;
            }
            Err(e) => self.fail(FETCH_FAILED, e),
        }
        self.loading = false;
    }

    pub async fn submit_comment(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let new = NewComment { text: text.to_string(), image: None };
        match self.api.create(&new).await {
            Ok(created) => {
                self.comments.insert(0, created);
                self.compose.clear();
                self.error = None;
            }
            Err(e) => self.fail(ADD_FAILED, e),
        }
    }

    /// Submits whatever is in the compose buffer.
    pub async fn submit_compose(&mut self) {
        let text = self.compose.clone();
        self.submit_comment(&text).await;
    }

    pub fn begin_edit(&mut self, comment: &Comment) {
        self.editing = Some(EditState { id: comment.id, draft: comment.text.clone() });
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Saves the draft for `id`. No-op unless `id` is the comment under edit
    /// and the draft has non-blank text.
    pub async fn save_edit(&mut self, id: Id) {
        let text = match self.editing.as_ref() {
            Some(edit) if edit.id == id => edit.draft.trim().to_string(),
            _ => {
                debug!(id, "save_edit ignored: comment is not under edit");
                return;
            }
        };
        if text.is_empty() {
            return;
        }
        match self.api.update(id, &UpdateComment { text }).await {
            Ok(updated) => {
                self.replace(updated);
                self.editing = None;
                self.error = None;
            }
            Err(e) => self.fail(UPDATE_FAILED, e),
        }
    }

    /// Deletes `id` after `confirm` agrees. Returns whether a request was sent.
    pub async fn remove_comment(&mut self, id: Id, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            return false;
        }
        match self.api.delete(id).await {
            Ok(()) => {
                self.comments.retain(|c| c.id != id);
                if self.editing.as_ref().is_some_and(|e| e.id == id) {
                    self.editing = None;
                }
                self.error = None;
            }
            Err(e) => self.fail(DELETE_FAILED, e),
        }
        true
    }

    /// Bumps the like counter of a locally known comment by one.
    /// Sends the absolute count, so likes from another client since the last load are overwritten.
    pub async fn like_comment(&mut self, id: Id) {
        let Some(likes) = self.comment(id).map(|c| c.likes) else {
            debug!(id, "like ignored: unknown comment");
            return;
        };
        let patch = PatchComment { likes: Some(likes.saturating_add(1)), ..Default::default() };
        match self.api.patch(id, &patch).await {
            Ok(updated) => {
                self.replace(updated);
                self.error = None;
            }
            Err(e) => self.fail(LIKE_FAILED, e),
        }
    }
}
