//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for sparse updates
//! - A `Deserialize` filter struct for list query parameters

use serde::{Deserialize, Deserializer};

pub mod audit;
pub mod blog;
pub mod club;
pub mod member;
pub mod news;
pub mod partner;
pub mod project;
pub mod stat;
pub mod user;
pub mod win;

/// Distinguish an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Use with `#[serde(default, deserialize_with = "nullable")]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of a reorder request: ids from highest to lowest position.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<itam_core::types::DbId>,
}
