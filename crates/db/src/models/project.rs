//! Portfolio projects and their tags.

use itam_core::error::CoreError;
use itam_core::types::{DbId, Timestamp};
use itam_core::validation::{reject_blank, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table with its tags attached.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(skip)]
    pub tags: Vec<Tag>,
}

/// A row from the `tags` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a project.
///
/// Tags may be given by id, by name (created on demand), or both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    #[serde(default)]
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
    #[serde(default)]
    pub tag_names: Vec<String>,
}

impl CreateProject {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)
    }
}

/// DTO for updating a project.
///
/// Supplying either tag list (even empty) replaces all tag associations;
/// omitting both leaves them untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
    pub tag_ids: Option<Vec<DbId>>,
    pub tag_names: Option<Vec<String>>,
}

impl UpdateProject {
    pub fn validate(&self) -> Result<(), CoreError> {
        reject_blank("title", self.title.as_deref())
    }

    pub fn has_tags(&self) -> bool {
        self.tag_ids.is_some() || self.tag_names.is_some()
    }
}

/// Query parameters for `GET /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub search: Option<String>,
    pub is_published: Option<bool>,
}
