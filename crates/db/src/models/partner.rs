use itam_core::error::CoreError;
use itam_core::types::{DbId, Timestamp};
use itam_core::validation::{reject_blank, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A sponsor or partner organization.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Partner {
    pub id: DbId,
    pub name: String,
    /// Inline SVG markup.
    pub logo_svg: Option<String>,
    pub website: Option<String>,
    pub sort_order: i32,
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePartner {
    #[serde(default)]
    pub name: String,
    pub logo_svg: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub is_visible: Option<bool>,
}

impl CreatePartner {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePartner {
    pub name: Option<String>,
    pub logo_svg: Option<String>,
    pub website: Option<String>,
    pub sort_order: Option<i32>,
    pub is_visible: Option<bool>,
}

impl UpdatePartner {
    pub fn validate(&self) -> Result<(), CoreError> {
        reject_blank("name", self.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartnerFilter {
    pub search: Option<String>,
    pub is_visible: Option<bool>,
}
