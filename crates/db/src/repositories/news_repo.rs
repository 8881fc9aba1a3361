//! Repository for the `news` table.

use async_trait::async_trait;
use itam_core::audit::entity_types;
use itam_core::cache::keys;
use itam_core::dates::parse_date;
use itam_core::error::CoreError;
use itam_core::types::DbId;
use itam_core::validation::check_date;
use sqlx::PgPool;

use super::non_blank;
use crate::entity::Entity;
use crate::models::news::{CreateNews, News, NewsFilter, UpdateNews};
use crate::query::{BindValue, FilterBuilder, Table, UpdateBuilder};

const COLUMNS: &str = "id, title, source, source_link, image, published_date, sort_order, \
                       is_visible, created_at, updated_at";

pub struct NewsRepo;

#[async_trait]
impl Entity for NewsRepo {
    type Record = News;
    type Create = CreateNews;
    type Update = UpdateNews;
    type Filter = NewsFilter;

    const KIND: &'static str = entity_types::NEWS;
    const LABEL: &'static str = "News item";
    const TABLE: Table = Table::simple(
        "news",
        COLUMNS,
        "sort_order DESC, published_date DESC NULLS LAST",
        "is_visible = TRUE",
    );
    const CACHE_KEYS: &'static [&'static str] = &[keys::PUBLIC_NEWS];

    fn validate_create(input: &CreateNews) -> Result<(), CoreError> {
        input.validate()
    }

    fn validate_update(input: &UpdateNews) -> Result<(), CoreError> {
        input.validate()
    }

    fn filter(filter: &NewsFilter) -> FilterBuilder {
        FilterBuilder::new()
            .search(&["title", "source"], filter.search.as_deref())
            .eq("is_visible", filter.is_visible)
    }

    fn changes(_existing: &News, input: &UpdateNews) -> Result<UpdateBuilder, CoreError> {
        let published_date = match input.published_date.as_deref() {
            Some(raw) => Some(BindValue::NullableDate(check_date("published_date", Some(raw))?)),
            None => None,
        };
        Ok(UpdateBuilder::new()
            .set_trimmed("title", input.title.as_deref())
            .set_trimmed("source", input.source.as_deref())
            .set_text_or_null("source_link", input.source_link.as_deref())
            .set_text_or_null("image", input.image.as_deref())
            .set("published_date", published_date)
            .set("sort_order", input.sort_order)
            .set("is_visible", input.is_visible))
    }

    async fn insert(pool: &PgPool, input: &CreateNews) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO news \
                (title, source, source_link, image, published_date, sort_order, is_visible) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(input.title.trim())
        .bind(input.source.trim())
        .bind(non_blank(input.source_link.as_deref()))
        .bind(non_blank(input.image.as_deref()))
        .bind(input.published_date.as_deref().and_then(parse_date))
        .bind(input.sort_order)
        .bind(input.is_visible.unwrap_or(true))
        .fetch_one(pool)
        .await
    }
}
