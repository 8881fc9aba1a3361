//! Generic reads and writes shared by every [`Entity`].

use itam_core::pagination::PageRequest;
use itam_core::types::DbId;
use sqlx::PgPool;

use crate::entity::Entity;
use crate::query::{arguments, BindValue, FilterBuilder, UpdateBuilder};

/// Zero-sized repository; every method is generic over the entity.
pub struct CrudRepo;

impl CrudRepo {
    /// One page of rows matching the entity's filter plus the total count
    /// under the same predicate.
    pub async fn list<E: Entity>(
        pool: &PgPool,
        filter: &E::Filter,
        page: PageRequest,
    ) -> Result<(Vec<E::Record>, i64), sqlx::Error> {
        let table = E::TABLE;
        let filter = E::filter(filter);
        let where_clause = filter.where_clause();

        let count_sql = format!("SELECT COUNT(*) FROM {} {where_clause}", table.from);
        let total: i64 = sqlx::query_scalar_with(&count_sql, arguments(filter.values())?)
            .fetch_one(pool)
            .await?;

        let (limit_clause, values) = filter.paginate(page.limit(), page.offset());
        let sql = format!(
            "SELECT {} FROM {} {where_clause} ORDER BY {} {limit_clause}",
            table.columns, table.from, table.order_by
        );
        let mut items = sqlx::query_as_with::<_, E::Record, _>(&sql, arguments(&values)?)
            .fetch_all(pool)
            .await?;
        E::hydrate(pool, &mut items).await?;

        Ok((items, total))
    }

    /// Every publicly visible row, unpaginated.
    pub async fn list_public<E: Entity>(pool: &PgPool) -> Result<Vec<E::Record>, sqlx::Error> {
        let table = E::TABLE;
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {}",
            table.columns, table.from, table.public_filter, table.order_by
        );
        let mut items = sqlx::query_as::<_, E::Record>(&sql).fetch_all(pool).await?;
        E::hydrate(pool, &mut items).await?;
        Ok(items)
    }

    pub async fn find_by_id<E: Entity>(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<E::Record>, sqlx::Error> {
        let table = E::TABLE;
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1",
            table.columns, table.from, table.id_column
        );
        let record = sqlx::query_as::<_, E::Record>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Self::hydrate_one::<E>(pool, record).await
    }

    /// Publicly visible row by slug. Always `None` for entities without slugs.
    pub async fn find_public_by_slug<E: Entity>(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<E::Record>, sqlx::Error> {
        let table = E::TABLE;
        let Some(slug_column) = table.slug_column else {
            return Ok(None);
        };
        let filter = FilterBuilder::new()
            .eq(slug_column, Some(slug))
            .predicate(table.public_filter);
        let sql = format!(
            "SELECT {} FROM {} {}",
            table.columns,
            table.from,
            filter.where_clause()
        );
        let record = sqlx::query_as_with::<_, E::Record, _>(&sql, arguments(filter.values())?)
            .fetch_optional(pool)
            .await?;
        Self::hydrate_one::<E>(pool, record).await
    }

    /// Apply a sparse update. Returns `false` when nothing was assigned or the
    /// row no longer exists.
    pub async fn update<E: Entity>(
        pool: &PgPool,
        id: DbId,
        changes: &UpdateBuilder,
    ) -> Result<bool, sqlx::Error> {
        let Some((sql, values)) = changes.build(&E::TABLE, id) else {
            return Ok(false);
        };
        let result = sqlx::query_with(&sql, arguments(&values)?)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump `updated_at` without changing any column.
    pub async fn touch<E: Entity>(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let sql = format!("UPDATE {} SET updated_at = NOW() WHERE id = $1", E::TABLE.name);
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete<E: Entity>(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE.name);
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assign `sort_order = ids.len() - position` in one statement.
    ///
    /// Ids with no matching row are ignored. Returns the number of rows
    /// updated.
    pub async fn reorder<E: Entity>(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let positions = sort_positions(ids.len());
        let sql = format!(
            "UPDATE {table} AS t SET sort_order = v.position, updated_at = NOW() \
             FROM UNNEST($1::BIGINT[], $2::INTEGER[]) AS v(id, position) \
             WHERE t.id = v.id",
            table = E::TABLE.name
        );
        let values = [BindValue::BigIntArray(ids.to_vec()), BindValue::IntArray(positions)];
        let result = sqlx::query_with(&sql, arguments(&values)?)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn hydrate_one<E: Entity>(
        pool: &PgPool,
        record: Option<E::Record>,
    ) -> Result<Option<E::Record>, sqlx::Error> {
        match record {
            Some(record) => {
                let mut records = [record];
                E::hydrate(pool, &mut records).await?;
                let [record] = records;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}

/// Descending positions `len, len-1, ..., 1`.
fn sort_positions(len: usize) -> Vec<i32> {
    (1..=len as i32).rev().collect()
}
