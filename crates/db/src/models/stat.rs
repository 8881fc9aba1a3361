//! Headline numbers on the landing page ("500+ students", ...).

use itam_core::error::CoreError;
use itam_core::types::{DbId, Timestamp};
use itam_core::validation::{reject_blank, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Stat {
    pub id: DbId,
    /// Stable identifier referenced by the frontend.
    pub key: String,
    pub value: String,
    pub label: Option<String>,
    pub sort_order: i32,
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStat {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    pub label: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub is_visible: Option<bool>,
}

impl CreateStat {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("key", &self.key)?;
        require_text("value", &self.value)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStat {
    pub key: Option<String>,
    pub value: Option<String>,
    pub label: Option<String>,
    pub sort_order: Option<i32>,
    pub is_visible: Option<bool>,
}

impl UpdateStat {
    pub fn validate(&self) -> Result<(), CoreError> {
        reject_blank("key", self.key.as_deref())?;
        reject_blank("value", self.value.as_deref())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatFilter {
    pub search: Option<String>,
}
