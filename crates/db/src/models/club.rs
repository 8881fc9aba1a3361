//! Student clubs and their image galleries.

use itam_core::error::CoreError;
use itam_core::types::{DbId, Timestamp};
use itam_core::validation::{check_non_negative, reject_blank, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clubs` table with its images attached.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Club {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub cover_image: Option<String>,
    pub chat_link: Option<String>,
    pub channel_link: Option<String>,
    pub members_count: i32,
    pub events_count: i32,
    pub wins_count: i32,
    pub sort_order: i32,
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(skip)]
    pub images: Vec<ClubImage>,
}

/// A row from the `club_images` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ClubImage {
    pub id: DbId,
    pub club_id: DbId,
    pub image_url: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateClub {
    #[serde(default)]
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub cover_image: Option<String>,
    pub chat_link: Option<String>,
    pub channel_link: Option<String>,
    #[serde(default)]
    pub members_count: i32,
    #[serde(default)]
    pub events_count: i32,
    #[serde(default)]
    pub wins_count: i32,
    #[serde(default)]
    pub sort_order: i32,
    pub is_visible: Option<bool>,
    /// Gallery in display order.
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl CreateClub {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        check_non_negative("members_count", self.members_count)?;
        check_non_negative("events_count", self.events_count)?;
        check_non_negative("wins_count", self.wins_count)?;
        Ok(())
    }
}

/// DTO for updating a club. A present `image_urls` replaces the gallery.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClub {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub cover_image: Option<String>,
    pub chat_link: Option<String>,
    pub channel_link: Option<String>,
    pub members_count: Option<i32>,
    pub events_count: Option<i32>,
    pub wins_count: Option<i32>,
    pub sort_order: Option<i32>,
    pub is_visible: Option<bool>,
    pub image_urls: Option<Vec<String>>,
}

impl UpdateClub {
    pub fn validate(&self) -> Result<(), CoreError> {
        reject_blank("name", self.name.as_deref())?;
        for (field, value) in [
            ("members_count", self.members_count),
            ("events_count", self.events_count),
            ("wins_count", self.wins_count),
        ] {
            if let Some(v) = value {
                check_non_negative(field, v)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubFilter {
    pub search: Option<String>,
    pub is_visible: Option<bool>,
}
