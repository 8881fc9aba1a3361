//! Repository for the `partners` table.

use async_trait::async_trait;
use itam_core::audit::entity_types;
use itam_core::cache::keys;
use itam_core::error::CoreError;
use itam_core::types::DbId;
use sqlx::PgPool;

use super::non_blank;
use crate::entity::Entity;
use crate::models::partner::{CreatePartner, Partner, PartnerFilter, UpdatePartner};
use crate::query::{FilterBuilder, Table, UpdateBuilder};

const COLUMNS: &str =
    "id, name, logo_svg, website, sort_order, is_visible, created_at, updated_at";

pub struct PartnerRepo;

#[async_trait]
impl Entity for PartnerRepo {
    type Record = Partner;
    type Create = CreatePartner;
    type Update = UpdatePartner;
    type Filter = PartnerFilter;

    const KIND: &'static str = entity_types::PARTNER;
    const LABEL: &'static str = "Partner";
    const TABLE: Table = Table::simple(
        "partners",
        COLUMNS,
        "sort_order DESC, created_at DESC",
        "is_visible = TRUE",
    );
    const CACHE_KEYS: &'static [&'static str] = &[keys::PUBLIC_PARTNERS];

    fn validate_create(input: &CreatePartner) -> Result<(), CoreError> {
        input.validate()
    }

    fn validate_update(input: &UpdatePartner) -> Result<(), CoreError> {
        input.validate()
    }

    fn filter(filter: &PartnerFilter) -> FilterBuilder {
        FilterBuilder::new()
            .search(&["name"], filter.search.as_deref())
            .eq("is_visible", filter.is_visible)
    }

    fn changes(_existing: &Partner, input: &UpdatePartner) -> Result<UpdateBuilder, CoreError> {
        Ok(UpdateBuilder::new()
            .set_trimmed("name", input.name.as_deref())
            .set_text_or_null("logo_svg", input.logo_svg.as_deref())
            .set_text_or_null("website", input.website.as_deref())
            .set("sort_order", input.sort_order)
            .set("is_visible", input.is_visible))
    }

    async fn insert(pool: &PgPool, input: &CreatePartner) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO partners (name, logo_svg, website, sort_order, is_visible) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(input.name.trim())
        .bind(non_blank(input.logo_svg.as_deref()))
        .bind(non_blank(input.website.as_deref()))
        .bind(input.sort_order)
        .bind(input.is_visible.unwrap_or(true))
        .fetch_one(pool)
        .await
    }
}
