//! Blog posts authored in a block editor.
//!
//! `content_json` holds the editor document; `content_html` is the rendered
//! form served to readers.

use itam_core::error::CoreError;
use itam_core::types::{DbId, Timestamp};
use itam_core::validation::{reject_blank, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content_json: serde_json::Value,
    pub content_html: Option<String>,
    pub cover_image: Option<String>,
    /// Stamped the first time the post is published.
    pub published_at: Option<Timestamp>,
    pub is_published: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBlogPost {
    #[serde(default)]
    pub title: String,
    pub slug: Option<String>,
    pub content_json: Option<serde_json::Value>,
    pub content_html: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl CreateBlogPost {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content_json: Option<serde_json::Value>,
    pub content_html: Option<String>,
    pub cover_image: Option<String>,
    pub is_published: Option<bool>,
    pub sort_order: Option<i32>,
}

impl UpdateBlogPost {
    pub fn validate(&self) -> Result<(), CoreError> {
        reject_blank("title", self.title.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPostFilter {
    pub search: Option<String>,
    pub is_published: Option<bool>,
}
