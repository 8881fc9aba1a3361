//! Repository for the `team_members` table.
//!
//! Reads join `clubs` to expose the club name; writes touch only
//! `team_members`.

use async_trait::async_trait;
use itam_core::audit::entity_types;
use itam_core::cache::keys;
use itam_core::error::CoreError;
use itam_core::types::DbId;
use sqlx::PgPool;

use super::non_blank;
use crate::entity::Entity;
use crate::models::member::{CreateMember, Member, MemberFilter, UpdateMember};
use crate::query::{BindValue, FilterBuilder, Table, UpdateBuilder};

const COLUMNS: &str = "tm.id, tm.name, tm.role, tm.photo, tm.club_id, c.name AS club_name, \
                       tm.badge, tm.telegram_link, tm.sort_order, tm.is_visible, \
                       tm.created_at, tm.updated_at";

pub struct MemberRepo;

#[async_trait]
impl Entity for MemberRepo {
    type Record = Member;
    type Create = CreateMember;
    type Update = UpdateMember;
    type Filter = MemberFilter;

    const KIND: &'static str = entity_types::TEAM;
    const LABEL: &'static str = "Team member";
    const TABLE: Table = Table {
        name: "team_members",
        from: "team_members tm LEFT JOIN clubs c ON c.id = tm.club_id",
        columns: COLUMNS,
        id_column: "tm.id",
        order_by: "tm.sort_order DESC, tm.created_at DESC",
        public_filter: "tm.is_visible = TRUE",
        slug_column: None,
    };
    const CACHE_KEYS: &'static [&'static str] = &[keys::PUBLIC_TEAM];

    fn validate_create(input: &CreateMember) -> Result<(), CoreError> {
        input.validate()
    }

    fn validate_update(input: &UpdateMember) -> Result<(), CoreError> {
        input.validate()
    }

    fn filter(filter: &MemberFilter) -> FilterBuilder {
        FilterBuilder::new()
            .search(&["tm.name", "tm.role"], filter.search.as_deref())
            .eq("tm.club_id", filter.club_id)
            .eq("tm.is_visible", filter.is_visible)
    }

    fn changes(_existing: &Member, input: &UpdateMember) -> Result<UpdateBuilder, CoreError> {
        Ok(UpdateBuilder::new()
            .set_trimmed("name", input.name.as_deref())
            .set_text_or_null("role", input.role.as_deref())
            .set_text_or_null("photo", input.photo.as_deref())
            .set("club_id", input.club_id.map(BindValue::NullableBigInt))
            .set_text_or_null("badge", input.badge.as_deref())
            .set_text_or_null("telegram_link", input.telegram_link.as_deref())
            .set("sort_order", input.sort_order)
            .set("is_visible", input.is_visible))
    }

    async fn insert(pool: &PgPool, input: &CreateMember) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO team_members \
                (name, role, photo, club_id, badge, telegram_link, sort_order, is_visible) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(input.name.trim())
        .bind(non_blank(input.role.as_deref()))
        .bind(non_blank(input.photo.as_deref()))
        .bind(input.club_id)
        .bind(non_blank(input.badge.as_deref()))
        .bind(non_blank(input.telegram_link.as_deref()))
        .bind(input.sort_order)
        .bind(input.is_visible.unwrap_or(true))
        .fetch_one(pool)
        .await
    }
}
