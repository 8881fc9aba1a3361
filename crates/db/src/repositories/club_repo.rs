//! Repository for the `clubs` table.

use std::collections::HashMap;

use async_trait::async_trait;
use itam_core::audit::entity_types;
use itam_core::cache::keys;
use itam_core::error::CoreError;
use itam_core::types::DbId;
use sqlx::PgPool;

use super::club_image_repo::ClubImageRepo;
use super::{non_blank, slug_for_insert, slug_for_update};
use crate::entity::Entity;
use crate::models::club::{Club, ClubFilter, ClubImage, CreateClub, UpdateClub};
use crate::query::{FilterBuilder, Table, UpdateBuilder};

const COLUMNS: &str = "id, name, slug, description, goal, cover_image, chat_link, channel_link, \
                       members_count, events_count, wins_count, sort_order, is_visible, \
                       created_at, updated_at";

pub struct ClubRepo;

#[async_trait]
impl Entity for ClubRepo {
    type Record = Club;
    type Create = CreateClub;
    type Update = UpdateClub;
    type Filter = ClubFilter;

    const KIND: &'static str = entity_types::CLUB;
    const LABEL: &'static str = "Club";
    const TABLE: Table = Table::simple(
        "clubs",
        COLUMNS,
        "sort_order DESC, created_at DESC",
        "is_visible = TRUE",
    )
    .with_slug("slug");
    // Team listings show club names.
    const CACHE_KEYS: &'static [&'static str] = &[keys::PUBLIC_CLUBS, keys::PUBLIC_TEAM];
    const CONFLICT_MESSAGE: &'static str = "A club with this slug already exists";

    fn validate_create(input: &CreateClub) -> Result<(), CoreError> {
        input.validate()
    }

    fn validate_update(input: &UpdateClub) -> Result<(), CoreError> {
        input.validate()
    }

    fn filter(filter: &ClubFilter) -> FilterBuilder {
        FilterBuilder::new()
            .search(&["name", "description"], filter.search.as_deref())
            .eq("is_visible", filter.is_visible)
    }

    fn changes(existing: &Club, input: &UpdateClub) -> Result<UpdateBuilder, CoreError> {
        let slug = slug_for_update(input.slug.as_deref(), input.name.as_deref(), &existing.name);
        Ok(UpdateBuilder::new()
            .set_trimmed("name", input.name.as_deref())
            .set("slug", slug)
            .set_text_or_null("description", input.description.as_deref())
            .set_text_or_null("goal", input.goal.as_deref())
            .set_text_or_null("cover_image", input.cover_image.as_deref())
            .set_text_or_null("chat_link", input.chat_link.as_deref())
            .set_text_or_null("channel_link", input.channel_link.as_deref())
            .set("members_count", input.members_count)
            .set("events_count", input.events_count)
            .set("wins_count", input.wins_count)
            .set("sort_order", input.sort_order)
            .set("is_visible", input.is_visible))
    }

    fn touches_associations(input: &UpdateClub) -> bool {
        input.image_urls.is_some()
    }

    async fn insert(pool: &PgPool, input: &CreateClub) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO clubs \
                (name, slug, description, goal, cover_image, chat_link, channel_link, \
                 members_count, events_count, wins_count, sort_order, is_visible) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING id",
        )
        .bind(input.name.trim())
        .bind(slug_for_insert(input.slug.as_deref(), &input.name))
        .bind(non_blank(input.description.as_deref()))
        .bind(non_blank(input.goal.as_deref()))
        .bind(non_blank(input.cover_image.as_deref()))
        .bind(non_blank(input.chat_link.as_deref()))
        .bind(non_blank(input.channel_link.as_deref()))
        .bind(input.members_count)
        .bind(input.events_count)
        .bind(input.wins_count)
        .bind(input.sort_order)
        .bind(input.is_visible.unwrap_or(true))
        .fetch_one(pool)
        .await
    }

    async fn hydrate(pool: &PgPool, records: &mut [Club]) -> Result<(), sqlx::Error> {
        if records.is_empty() {
            return Ok(());
        }
        let ids: Vec<DbId> = records.iter().map(|c| c.id).collect();
        let mut by_club: HashMap<DbId, Vec<ClubImage>> = HashMap::new();
        for image in ClubImageRepo::for_clubs(pool, &ids).await? {
            by_club.entry(image.club_id).or_default().push(image);
        }
        for club in records.iter_mut() {
            club.images = by_club.remove(&club.id).unwrap_or_default();
        }
        Ok(())
    }

    async fn sync_created(pool: &PgPool, id: DbId, input: &CreateClub) -> Result<(), sqlx::Error> {
        if input.image_urls.is_empty() {
            return Ok(());
        }
        ClubImageRepo::replace_for_club(pool, id, &input.image_urls).await
    }

    async fn sync_updated(pool: &PgPool, id: DbId, input: &UpdateClub) -> Result<(), sqlx::Error> {
        ClubImageRepo::replace_for_club(pool, id, input.image_urls.as_deref().unwrap_or_default())
            .await
    }
}
