//! Repository for the `blog_posts` table.

use async_trait::async_trait;
use chrono::Utc;
use itam_core::audit::entity_types;
use itam_core::cache::keys;
use itam_core::error::CoreError;
use itam_core::types::DbId;
use sqlx::PgPool;

use super::{non_blank, slug_for_insert, slug_for_update};
use crate::entity::Entity;
use crate::models::blog::{BlogPost, BlogPostFilter, CreateBlogPost, UpdateBlogPost};
use crate::query::{FilterBuilder, Table, UpdateBuilder};

const COLUMNS: &str = "id, title, slug, content_json, content_html, cover_image, published_at, \
                       is_published, sort_order, created_at, updated_at";

pub struct BlogRepo;

#[async_trait]
impl Entity for BlogRepo {
    type Record = BlogPost;
    type Create = CreateBlogPost;
    type Update = UpdateBlogPost;
    type Filter = BlogPostFilter;

    const KIND: &'static str = entity_types::BLOG;
    const LABEL: &'static str = "Blog post";
    const TABLE: Table = Table::simple(
        "blog_posts",
        COLUMNS,
        "sort_order DESC, published_at DESC NULLS LAST",
        "is_published = TRUE",
    )
    .with_slug("slug");
    const CACHE_KEYS: &'static [&'static str] = &[keys::PUBLIC_BLOG];
    const CONFLICT_MESSAGE: &'static str = "A blog post with this slug already exists";

    fn validate_create(input: &CreateBlogPost) -> Result<(), CoreError> {
        input.validate()
    }

    fn validate_update(input: &UpdateBlogPost) -> Result<(), CoreError> {
        input.validate()
    }

    fn filter(filter: &BlogPostFilter) -> FilterBuilder {
        FilterBuilder::new()
            .search(&["title"], filter.search.as_deref())
            .eq("is_published", filter.is_published)
    }

    /// Publishing a post that has never been published stamps `published_at`.
    fn changes(existing: &BlogPost, input: &UpdateBlogPost) -> Result<UpdateBuilder, CoreError> {
        let slug = slug_for_update(input.slug.as_deref(), input.title.as_deref(), &existing.title);
        let first_publish = input.is_published == Some(true) && existing.published_at.is_none();
        Ok(UpdateBuilder::new()
            .set_trimmed("title", input.title.as_deref())
            .set("slug", slug)
            .set("content_json", input.content_json.clone())
            .set_text_or_null("content_html", input.content_html.as_deref())
            .set_text_or_null("cover_image", input.cover_image.as_deref())
            .set("is_published", input.is_published)
            .set("published_at", first_publish.then(Utc::now))
            .set("sort_order", input.sort_order))
    }

    async fn insert(pool: &PgPool, input: &CreateBlogPost) -> Result<DbId, sqlx::Error> {
        let content_json = input
            .content_json
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));
        let published_at = input.is_published.then(Utc::now);

        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO blog_posts \
                (title, slug, content_json, content_html, cover_image, published_at, is_published, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(input.title.trim())
        .bind(slug_for_insert(input.slug.as_deref(), &input.title))
        .bind(content_json)
        .bind(non_blank(input.content_html.as_deref()))
        .bind(non_blank(input.cover_image.as_deref()))
        .bind(published_at)
        .bind(input.is_published)
        .bind(input.sort_order)
        .fetch_one(pool)
        .await
    }
}
