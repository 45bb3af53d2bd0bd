//! HTTP access to the comment collection resource.
//!
//! [`CommentApi`] is the seam the board talks through; [`HttpCommentApi`] is
//! the reqwest-backed implementation. Every call is fire-once: no retries and
//! no request timeout beyond what the transport imposes.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::models::{Comment, Id, NewComment, PatchComment, UpdateComment};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    /// Reads `COMMENTS_API_URL`, defaulting to the local development server.
    pub fn from_env() -> Self {
        Self::new(std::env::var("COMMENTS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))
    }

    pub fn collection_url(&self) -> String {
        format!("{}/comments/", self.base_url)
    }

    pub fn item_url(&self, id: Id) -> String {
        format!("{}/comments/{}/", self.base_url, id)
    }
}

#[async_trait]
pub trait CommentApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Comment>>;
    async fn create(&self, new: &NewComment) -> ClientResult<Comment>;
    async fn update(&self, id: Id, upd: &UpdateComment) -> ClientResult<Comment>;
    async fn patch(&self, id: Id, patch: &PatchComment) -> ClientResult<Comment>;
    async fn delete(&self, id: Id) -> ClientResult<()>;
}

#[derive(Clone)]
pub struct HttpCommentApi {
    client: Client,
    cfg: ClientConfig,
}

impl HttpCommentApi {
    pub fn new(cfg: ClientConfig) -> Self {
        Self { client: Client::new(), cfg }
    }

    pub fn from_env() -> Self { Self::new(ClientConfig::from_env()) }

    pub fn config(&self) -> &ClientConfig { &self.cfg }

    async fn json<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl CommentApi for HttpCommentApi {
    async fn list(&self) -> ClientResult<Vec<Comment>> {
        let resp = self.client.get(self.cfg.collection_url()).send().await?;
        Self::json(resp).await
    }

    async fn create(&self, new: &NewComment) -> ClientResult<Comment> {
        let resp = self.client.post(self.cfg.collection_url()).json(new).send().await?;
        Self::json(resp).await
    }

    async fn update(&self, id: Id, upd: &UpdateComment) -> ClientResult<Comment> {
        let resp = self.client.put(self.cfg.item_url(id)).json(upd).send().await?;
        Self::json(resp).await
    }

    async fn patch(&self, id: Id, patch: &PatchComment) -> ClientResult<Comment> {
        let resp = self.client.patch(self.cfg.item_url(id)).json(patch).send().await?;
        Self::json(resp).await
    }

    async fn delete(&self, id: Id) -> ClientResult<()> {
        let resp = self.client.delete(self.cfg.item_url(id)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        Ok(())
    }
}
