use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type Id = i64;

/// Username of the account every new comment is attributed to.
pub const DEFAULT_AUTHOR: &str = "admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: Id,
    pub text: String,
    pub author: Id,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes: u32,
    pub image: Option<String>, // absolute URI, rendered below the text
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewComment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Full replacement body for `PUT /comments/{id}/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateComment {
    pub text: String,
}

/// Partial update body for `PATCH /comments/{id}/`; absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PatchComment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: Id,
    pub username: String,
    pub first_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthor {
    pub username: String,
    pub first_name: String,
}

impl NewAuthor {
    /// Builds the account for a display name: `"Jane Doe"` becomes `jane_doe`.
    pub fn from_display_name(name: &str) -> Self {
        Self {
            username: name.to_lowercase().replace(' ', "_"),
            first_name: name.to_string(),
        }
    }

    pub fn admin() -> Self {
        Self { username: DEFAULT_AUTHOR.into(), first_name: "Admin".into() }
    }
}

/// Repository-side create, carrying the fields the HTTP surface never accepts.
#[derive(Debug, Clone)]
pub struct CommentDraft {
    pub text: String,
    pub author: Id,
    pub likes: u32,
    pub image: Option<String>,
}

/// Empty image strings are stored as "no image".
pub fn normalize_image(image: Option<String>) -> Option<String> {
    image.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
