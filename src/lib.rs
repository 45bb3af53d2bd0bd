pub mod board;
pub mod client;
pub mod error;
pub mod models;
pub mod openapi;
pub mod render;
pub mod repo;
pub mod routes;
pub mod seed;
pub mod settings;

// Re-export commonly used items for tests / external users
pub use board::CommentBoard;
pub use client::{ClientConfig, CommentApi, HttpCommentApi};
pub use routes::{config, AppState};
