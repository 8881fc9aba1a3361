//! Repository for the `stats` table.

use async_trait::async_trait;
use itam_core::audit::entity_types;
use itam_core::cache::keys;
use itam_core::error::CoreError;
use itam_core::types::DbId;
use sqlx::PgPool;

use super::non_blank;
use crate::entity::Entity;
use crate::models::stat::{CreateStat, Stat, StatFilter, UpdateStat};
use crate::query::{FilterBuilder, Table, UpdateBuilder};

const COLUMNS: &str = "id, key, value, label, sort_order, is_visible, created_at, updated_at";

pub struct StatRepo;

#[async_trait]
impl Entity for StatRepo {
    type Record = Stat;
    type Create = CreateStat;
    type Update = UpdateStat;
    type Filter = StatFilter;

    const KIND: &'static str = entity_types::STAT;
    const LABEL: &'static str = "Stat";
    const TABLE: Table = Table::simple(
        "stats",
        COLUMNS,
        "sort_order DESC, key ASC",
        "is_visible = TRUE",
    );
    const CACHE_KEYS: &'static [&'static str] = &[keys::PUBLIC_STATS];
    const CONFLICT_MESSAGE: &'static str = "A stat with this key already exists";

    fn validate_create(input: &CreateStat) -> Result<(), CoreError> {
        input.validate()
    }

    fn validate_update(input: &UpdateStat) -> Result<(), CoreError> {
        input.validate()
    }

    fn filter(filter: &StatFilter) -> FilterBuilder {
        FilterBuilder::new().search(&["key", "label"], filter.search.as_deref())
    }

    fn changes(_existing: &Stat, input: &UpdateStat) -> Result<UpdateBuilder, CoreError> {
        Ok(UpdateBuilder::new()
            .set("key", input.key.as_deref().map(str::trim))
            .set_trimmed("value", input.value.as_deref())
            .set_text_or_null("label", input.label.as_deref())
            .set("sort_order", input.sort_order)
            .set("is_visible", input.is_visible))
    }

    async fn insert(pool: &PgPool, input: &CreateStat) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO stats (key, value, label, sort_order, is_visible) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(input.key.trim())
        .bind(input.value.trim())
        .bind(non_blank(input.label.as_deref()))
        .bind(input.sort_order)
        .bind(input.is_visible.unwrap_or(true))
        .fetch_one(pool)
        .await
    }
}

impl StatRepo {
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Stat>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM stats WHERE key = $1");
        sqlx::query_as::<_, Stat>(&sql)
            .bind(key)
            .fetch_optional(pool)
            .await
    }
}
