use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_domain::id::{CommentId, RecipeId, UserId};
use pantry_domain::rating::{AggregateRating, RatingValue};
use pantry_domain::user::UserRole;

use crate::error::RecipesServiceError;

/// Display name recorded on comments from viewers without one.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous";

/// A recipe document.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable recipe fields, as submitted by an admin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    /// Explicit image URL. Replaced by the upload's URL when an image is
    /// attached. On update, `None` keeps the stored image and a blank value
    /// clears it.
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

/// An image attached to a recipe create/edit request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub data: bytes::Bytes,
}

/// Recipe detail as seen by one viewer.
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub rating: AggregateRating,
    pub is_favorite: bool,
    pub own_rating: Option<RatingValue>,
    pub video_embed_url: Option<String>,
}

/// Aggregate plus the viewer's own value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub aggregate: AggregateRating,
    pub own_rating: Option<RatingValue>,
}

/// An immutable comment under a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub recipe_id: RecipeId,
    pub user_id: UserId,
    pub display_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Order comments for display: newest first, ties broken by id.
pub fn sort_newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// User/role record. Provisioned out-of-band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub display_name: Option<String>,
    pub role: UserRole,
}

/// Authentication state reported by the identity provider for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn { user_id: UserId, name: Option<String> },
    SignedOut,
}

/// Identity context passed explicitly into every operation that needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Viewer {
    pub user_id: Option<UserId>,
    pub is_admin: bool,
    pub display_name: Option<String>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user_id: UserId, display_name: Option<String>, is_admin: bool) -> Self {
        Self {
            user_id: Some(user_id),
            is_admin,
            display_name,
        }
    }

    /// The viewer's user id, or `LoginRequired` when anonymous.
    pub fn require_user(&self) -> Result<UserId, RecipesServiceError> {
        self.user_id.ok_or(RecipesServiceError::LoginRequired)
    }

    /// `LoginRequired` when anonymous, `Forbidden` when not an admin.
    pub fn require_admin(&self) -> Result<UserId, RecipesServiceError> {
        let user_id = self.require_user()?;
        if !self.is_admin {
            return Err(RecipesServiceError::Forbidden);
        }
        Ok(user_id)
    }

    /// Name to record on content this viewer authors.
    pub fn author_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or(ANONYMOUS_DISPLAY_NAME)
    }
}

// ── Forum ────────────────────────────────────────────────────────────────────

/// Identifier assigned by the forum; numeric or textual depending on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForumId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ForumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumCategory {
    pub id: ForumId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    #[serde(alias = "id")]
    pub thread_id: ForumId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadComment {
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    #[serde(alias = "threadId")]
    pub id: ForumId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub comments: Vec<ThreadComment>,
}

/// Payload of the forum's thread-creation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewThread {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub category: String,
    pub user_id: UserId,
}
