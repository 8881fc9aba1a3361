//! Repository for `tags` and the `project_tags` join table.

use itam_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::project::Tag;

/// A tag together with the project it is attached to.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectTagRow {
    pub project_id: DbId,
    pub id: DbId,
    pub name: String,
}

pub struct TagRepo;

impl TagRepo {
    /// All tags, alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Return the tag called `name`, creating it if necessary.
    pub async fn upsert_by_name(pool: &PgPool, name: &str) -> Result<Tag, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, name",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Tags of every project in `project_ids`, ordered by project then name.
    pub async fn for_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectTagRow>, sqlx::Error> {
        sqlx::query_as::<_, ProjectTagRow>(
            "SELECT pt.project_id, t.id, t.name \
             FROM project_tags pt \
             JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.project_id = ANY($1) \
             ORDER BY pt.project_id, t.name",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await
    }

    /// Replace all of a project's tags with `tag_ids` plus the tags named in
    /// `tag_names` (created on demand). Unknown ids are skipped.
    pub async fn replace_for_project(
        pool: &PgPool,
        project_id: DbId,
        tag_ids: &[DbId],
        tag_names: &[String],
    ) -> Result<(), sqlx::Error> {
        let mut ids: Vec<DbId> = tag_ids.to_vec();
        for name in tag_names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            ids.push(Self::upsert_by_name(pool, name).await?.id);
        }
        ids.sort_unstable();
        ids.dedup();

        sqlx::query("DELETE FROM project_tags WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;

        if !ids.is_empty() {
            sqlx::query(
                "INSERT INTO project_tags (project_id, tag_id) \
                 SELECT $1, t.id FROM tags t WHERE t.id = ANY($2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(project_id)
            .bind(&ids)
            .execute(pool)
            .await?;
        }
        Ok(())
    }
}
