//! Repository for the append-only `audit_logs` table.

use itam_core::pagination::PageRequest;
use sqlx::PgPool;

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};
use crate::query::{arguments, FilterBuilder};

const COLUMNS: &str =
    "id, user_id, action, entity_type, entity_id, changes, ip_address, created_at";

pub struct AuditRepo;

impl AuditRepo {
    /// Append one entry.
    pub async fn insert(pool: &PgPool, entry: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let sql = format!(
            "INSERT INTO audit_logs (user_id, action, entity_type, entity_id, changes, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&sql)
            .bind(entry.user_id)
            .bind(&entry.action)
            .bind(&entry.entity_type)
            .bind(entry.entity_id)
            .bind(&entry.changes)
            .bind(&entry.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Filtered page of entries, newest first, plus the matching total.
    pub async fn list(
        pool: &PgPool,
        params: &AuditQuery,
        page: PageRequest,
    ) -> Result<(Vec<AuditLog>, i64), sqlx::Error> {
        let filter = build_audit_filter(params);
        let where_clause = filter.where_clause();

        let count_sql = format!("SELECT COUNT(*) FROM audit_logs {where_clause}");
        let total: i64 = sqlx::query_scalar_with(&count_sql, arguments(filter.values())?)
            .fetch_one(pool)
            .await?;

        let (limit_clause, values) = filter.paginate(page.limit(), page.offset());
        let sql = format!(
            "SELECT {COLUMNS} FROM audit_logs {where_clause} \
             ORDER BY created_at DESC, id DESC {limit_clause}"
        );
        let items = sqlx::query_as_with::<_, AuditLog, _>(&sql, arguments(&values)?)
            .fetch_all(pool)
            .await?;

        Ok((items, total))
    }
}

/// `date_to` is inclusive, so it compares against the start of the next day.
fn build_audit_filter(params: &AuditQuery) -> FilterBuilder {
    FilterBuilder::new()
        .eq("user_id", params.user_id)
        .eq("action", params.action.clone())
        .eq("entity_type", params.entity_type.clone())
        .gte("created_at", params.date_from)
        .lt("created_at", params.date_to.and_then(|d| d.succ_opt()))
}
