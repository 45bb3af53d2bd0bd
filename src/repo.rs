use crate::models::*;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("not found")] NotFound,
    #[error("internal: {0}")] Internal(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

use async_trait::async_trait;

#[async_trait]
pub trait CommentRepo: Send + Sync {
    /// Newest first.
    async fn list_comments(&self) -> RepoResult<Vec<Comment>>;
    async fn get_comment(&self, id: Id) -> RepoResult<Comment>;
    async fn create_comment(&self, draft: CommentDraft) -> RepoResult<Comment>;
    async fn update_comment(&self, id: Id, patch: PatchComment) -> RepoResult<Comment>;
    async fn delete_comment(&self, id: Id) -> RepoResult<()>;
    /// Removes every comment, returning how many were dropped.
    async fn clear_comments(&self) -> RepoResult<usize>;
}

#[async_trait]
pub trait AuthorRepo: Send + Sync {
    /// Returns the author with `new.username`, creating it when missing.
    async fn ensure_author(&self, new: NewAuthor) -> RepoResult<Author>;
    async fn get_author_by_username(&self, username: &str) -> RepoResult<Author>;
    async fn count_authors(&self) -> RepoResult<usize>;
}

pub trait Repo: CommentRepo + AuthorRepo {}

impl<T> Repo for T where T: CommentRepo + AuthorRepo {}

#[cfg(feature = "inmem-store")]
pub mod inmem {
    use super::*;
    use chrono::Utc;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
    use tracing::{info, warn};

    const SNAPSHOT_PATH: &str = "data/state.json";

    #[derive(Default, Serialize, Deserialize)]
    struct State {
        comments: HashMap<Id, Comment>,
        authors:  HashMap<Id, Author>,
        next_id: Id,
    }

    #[derive(Clone)]
    pub struct InMemRepo {
        state: Arc<RwLock<State>>,
        snapshot_path: Arc<PathBuf>,
    }

    impl InMemRepo {
        fn snapshot_path() -> PathBuf {
            match std::env::var("COMMENTS_DATA_DIR") {
                Ok(dir) => PathBuf::from(dir).join("state.json"),
                Err(_) => PathBuf::from(SNAPSHOT_PATH),
            }
        }

        fn load_state_from(path: &Path) -> State {
            match std::fs::read(path) {
                Ok(bytes) => match serde_json::from_slice::<State>(&bytes) {
                    Ok(s) => {
                        info!("loaded snapshot '{}' ({} comments)", path.display(), s.comments.len());
                        s
                    }
                    Err(e) => {
                        warn!("failed to parse snapshot '{}': {e}; starting empty", path.display());
                        State::default()
                    }
                },
                Err(e) => {
                    info!("no snapshot at '{}': {e}; starting empty", path.display());
                    State::default()
                }
            }
        }

        /// Writes `state` to a sibling temp file and renames it over the snapshot.
        /// Callers hold the write lock, so snapshots never interleave.
        fn persist(&self, state: &State) {
            let path = &*self.snapshot_path;
            let bytes = match serde_json::to_vec_pretty(state) {
                Ok(b) => b,
                Err(e) => { warn!("failed to encode snapshot: {e}"); return; }
            };
            if let Some(dir) = path.parent() {
                let _ = std::fs::create_dir_all(dir);
            }
            let tmp = path.with_extension("json.tmp");
            if let Err(e) = std::fs::write(&tmp, bytes).and_then(|_| std::fs::rename(&tmp, path)) {
                warn!("failed to write snapshot '{}': {e}", path.display());
            }
        }

        /// Repository rooted at `COMMENTS_DATA_DIR` (or `./data`).
        pub fn new() -> Self {
            Self::with_snapshot_path(Self::snapshot_path())
        }

        pub fn with_snapshot_path(path: impl Into<PathBuf>) -> Self {
            let snapshot_path = path.into();
            let state = Self::load_state_from(&snapshot_path);
            Self {
                state: Arc::new(RwLock::new(state)),
                snapshot_path: Arc::new(snapshot_path),
            }
        }

        fn read(&self) -> RepoResult<RwLockReadGuard<'_, State>> {
            self.state.read().map_err(|_| RepoError::Internal("state lock poisoned".into()))
        }

        fn write(&self) -> RepoResult<RwLockWriteGuard<'_, State>> {
            self.state.write().map_err(|_| RepoError::Internal("state lock poisoned".into()))
        }

        fn next_id(state: &mut State) -> Id {
            state.next_id += 1;
            state.next_id
        }
    }

    impl Default for InMemRepo {
        fn default() -> Self { Self::new() }
    }

    #[async_trait]
    impl CommentRepo for InMemRepo {
        async fn list_comments(&self) -> RepoResult<Vec<Comment>> {
            let s = self.read()?;
            let mut v: Vec<_> = s.comments.values().cloned().collect();
            v.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))); // latest first
            Ok(v)
        }

        async fn get_comment(&self, id: Id) -> RepoResult<Comment> {
            let s = self.read()?;
            s.comments.get(&id).cloned().ok_or(RepoError::NotFound)
        }

        async fn create_comment(&self, draft: CommentDraft) -> RepoResult<Comment> {
            let mut s = self.write()?;
            let author_name = s.authors.get(&draft.author).ok_or(RepoError::NotFound)?.first_name.clone();
            let now = Utc::now();
            let id = Self::next_id(&mut s);
            let comment = Comment {
                id,
                text: draft.text,
                author: draft.author,
                author_name,
                created_at: now,
                updated_at: now,
                likes: draft.likes,
                image: normalize_image(draft.image),
            };
            s.comments.insert(id, comment.clone());
            self.persist(&s);
            Ok(comment)
        }

        async fn update_comment(&self, id: Id, patch: PatchComment) -> RepoResult<Comment> {
            let mut s = self.write()?;
            let comment = s.comments.get_mut(&id).ok_or(RepoError::NotFound)?;
            if let Some(text) = patch.text { comment.text = text; }
            if let Some(likes) = patch.likes { comment.likes = likes; }
            if patch.image.is_some() { comment.image = normalize_image(patch.image); }
            comment.updated_at = Utc::now();
            let updated = comment.clone();
            self.persist(&s);
            Ok(updated)
        }

        async fn delete_comment(&self, id: Id) -> RepoResult<()> {
            let mut s = self.write()?;
            s.comments.remove(&id).ok_or(RepoError::NotFound)?;
            self.persist(&s);
            Ok(())
        }

        async fn clear_comments(&self) -> RepoResult<usize> {
            let mut s = self.write()?;
            let n = s.comments.len();
            s.comments.clear();
            self.persist(&s);
            Ok(n)
        }
    }

    #[async_trait]
    impl AuthorRepo for InMemRepo {
        async fn ensure_author(&self, new: NewAuthor) -> RepoResult<Author> {
            let mut s = self.write()?;
            if let Some(existing) = s.authors.values().find(|a| a.username == new.username) {
                return Ok(existing.clone());
            }
            let id = Self::next_id(&mut s);
            let author = Author { id, username: new.username, first_name: new.first_name };
            s.authors.insert(id, author.clone());
            self.persist(&s);
            Ok(author)
        }

        async fn get_author_by_username(&self, username: &str) -> RepoResult<Author> {
            let s = self.read()?;
            s.authors.values().find(|a| a.username == username).cloned().ok_or(RepoError::NotFound)
        }

        async fn count_authors(&self) -> RepoResult<usize> {
            Ok(self.read()?.authors.len())
        }
    }
}
