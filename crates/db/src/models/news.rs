//! News items linking to external coverage.

use chrono::NaiveDate;
use itam_core::error::CoreError;
use itam_core::types::{DbId, Timestamp};
use itam_core::validation::{check_date, reject_blank, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub source: String,
    pub source_link: Option<String>,
    pub image: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub sort_order: i32,
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNews {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    pub source_link: Option<String>,
    pub image: Option<String>,
    pub published_date: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub is_visible: Option<bool>,
}

impl CreateNews {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require_text("source", &self.source)?;
        check_date("published_date", self.published_date.as_deref())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub source: Option<String>,
    pub source_link: Option<String>,
    pub image: Option<String>,
    pub published_date: Option<String>,
    pub sort_order: Option<i32>,
    pub is_visible: Option<bool>,
}

impl UpdateNews {
    pub fn validate(&self) -> Result<(), CoreError> {
        reject_blank("title", self.title.as_deref())?;
        reject_blank("source", self.source.as_deref())?;
        check_date("published_date", self.published_date.as_deref())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsFilter {
    pub search: Option<String>,
    pub is_visible: Option<bool>,
}
