//! Repository for the `projects` table.

use std::collections::HashMap;

use async_trait::async_trait;
use itam_core::audit::entity_types;
use itam_core::cache::keys;
use itam_core::error::CoreError;
use itam_core::types::DbId;
use sqlx::PgPool;

use super::tag_repo::TagRepo;
use super::{non_blank, slug_for_insert, slug_for_update};
use crate::entity::Entity;
use crate::models::project::{CreateProject, Project, ProjectFilter, Tag, UpdateProject};
use crate::query::{FilterBuilder, Table, UpdateBuilder};

const COLUMNS: &str = "id, title, slug, description, cover_image, sort_order, is_published, \
                       created_at, updated_at";

pub struct ProjectRepo;

#[async_trait]
impl Entity for ProjectRepo {
    type Record = Project;
    type Create = CreateProject;
    type Update = UpdateProject;
    type Filter = ProjectFilter;

    const KIND: &'static str = entity_types::PROJECT;
    const LABEL: &'static str = "Project";
    const TABLE: Table = Table::simple(
        "projects",
        COLUMNS,
        "sort_order DESC, created_at DESC",
        "is_published = TRUE",
    )
    .with_slug("slug");
    const CACHE_KEYS: &'static [&'static str] = &[keys::PUBLIC_PROJECTS];
    const CONFLICT_MESSAGE: &'static str = "A project with this slug already exists";

    fn validate_create(input: &CreateProject) -> Result<(), CoreError> {
        input.validate()
    }

    fn validate_update(input: &UpdateProject) -> Result<(), CoreError> {
        input.validate()
    }

    fn filter(filter: &ProjectFilter) -> FilterBuilder {
        FilterBuilder::new()
            .search(&["title", "description"], filter.search.as_deref())
            .eq("is_published", filter.is_published)
    }

    fn changes(existing: &Project, input: &UpdateProject) -> Result<UpdateBuilder, CoreError> {
        let slug = slug_for_update(input.slug.as_deref(), input.title.as_deref(), &existing.title);
        Ok(UpdateBuilder::new()
            .set_trimmed("title", input.title.as_deref())
            .set("slug", slug)
            .set_text_or_null("description", input.description.as_deref())
            .set_text_or_null("cover_image", input.cover_image.as_deref())
            .set("sort_order", input.sort_order)
            .set("is_published", input.is_published))
    }

    fn touches_associations(input: &UpdateProject) -> bool {
        input.has_tags()
    }

    async fn insert(pool: &PgPool, input: &CreateProject) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO projects (title, slug, description, cover_image, sort_order, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(input.title.trim())
        .bind(slug_for_insert(input.slug.as_deref(), &input.title))
        .bind(non_blank(input.description.as_deref()))
        .bind(non_blank(input.cover_image.as_deref()))
        .bind(input.sort_order)
        .bind(input.is_published)
        .fetch_one(pool)
        .await
    }

    async fn hydrate(pool: &PgPool, records: &mut [Project]) -> Result<(), sqlx::Error> {
        if records.is_empty() {
            return Ok(());
        }
        let ids: Vec<DbId> = records.iter().map(|p| p.id).collect();
        let mut by_project: HashMap<DbId, Vec<Tag>> = HashMap::new();
        for row in TagRepo::for_projects(pool, &ids).await? {
            by_project.entry(row.project_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
            });
        }
        for project in records.iter_mut() {
            project.tags = by_project.remove(&project.id).unwrap_or_default();
        }
        Ok(())
    }

    async fn sync_created(pool: &PgPool, id: DbId, input: &CreateProject) -> Result<(), sqlx::Error> {
        if input.tag_ids.is_empty() && input.tag_names.is_empty() {
            return Ok(());
        }
        TagRepo::replace_for_project(pool, id, &input.tag_ids, &input.tag_names).await
    }

    async fn sync_updated(pool: &PgPool, id: DbId, input: &UpdateProject) -> Result<(), sqlx::Error> {
        TagRepo::replace_for_project(
            pool,
            id,
            input.tag_ids.as_deref().unwrap_or_default(),
            input.tag_names.as_deref().unwrap_or_default(),
        )
        .await
    }
}
