//! Team members shown on the "about us" page.

use itam_core::error::CoreError;
use itam_core::types::{DbId, Timestamp};
use itam_core::validation::{reject_blank, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::nullable;

/// A row from `team_members`, joined with its club's name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub name: String,
    pub role: Option<String>,
    pub photo: Option<String>,
    pub club_id: Option<DbId>,
    pub club_name: Option<String>,
    pub badge: Option<String>,
    pub telegram_link: Option<String>,
    pub sort_order: i32,
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMember {
    #[serde(default)]
    pub name: String,
    pub role: Option<String>,
    pub photo: Option<String>,
    pub club_id: Option<DbId>,
    pub badge: Option<String>,
    pub telegram_link: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub is_visible: Option<bool>,
}

impl CreateMember {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)
    }
}

/// DTO for updating a member. `"club_id": null` detaches the club.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMember {
    pub name: Option<String>,
    pub role: Option<String>,
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub club_id: Option<Option<DbId>>,
    pub badge: Option<String>,
    pub telegram_link: Option<String>,
    pub sort_order: Option<i32>,
    pub is_visible: Option<bool>,
}

impl UpdateMember {
    pub fn validate(&self) -> Result<(), CoreError> {
        reject_blank("name", self.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberFilter {
    pub search: Option<String>,
    pub club_id: Option<DbId>,
    pub is_visible: Option<bool>,
}
