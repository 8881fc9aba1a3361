//! The per-entity contract consumed by the generic CRUD repository and the
//! API's CRUD service.
//!
//! An implementation supplies the storage description ([`Table`]), the
//! create/update/filter DTOs, validation, and the entity-specific SQL that
//! cannot be derived generically (inserts and association sync).

use async_trait::async_trait;
use itam_core::error::CoreError;
use itam_core::types::DbId;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::query::{FilterBuilder, Table, UpdateBuilder};

#[async_trait]
pub trait Entity: Send + Sync + 'static {
    /// Row type returned by reads, hydrated with its associations.
    type Record: for<'r> FromRow<'r, PgRow> + Serialize + Clone + Send + Sync + Unpin + 'static;
    type Create: Send + Sync + 'static;
    type Update: Send + Sync + 'static;
    type Filter: Send + Sync + 'static;

    /// Audit `entity_type` tag.
    const KIND: &'static str;
    /// Human-readable name used in error messages.
    const LABEL: &'static str;
    const TABLE: Table;
    /// Public cache keys to invalidate after any mutation.
    const CACHE_KEYS: &'static [&'static str];
    /// Message for unique-constraint conflicts on insert or update.
    const CONFLICT_MESSAGE: &'static str = "A record with the same unique value already exists";

    fn validate_create(input: &Self::Create) -> Result<(), CoreError>;

    fn validate_update(input: &Self::Update) -> Result<(), CoreError>;

    /// Translate the listing filter into predicates.
    fn filter(filter: &Self::Filter) -> FilterBuilder;

    /// Column assignments for a sparse update. `existing` is the current row,
    /// for entities whose assignments depend on prior state.
    fn changes(existing: &Self::Record, input: &Self::Update) -> Result<UpdateBuilder, CoreError>;

    /// Whether the update explicitly carries association data.
    fn touches_associations(_input: &Self::Update) -> bool {
        false
    }

    /// Insert the primary row and return its id.
    async fn insert(pool: &PgPool, input: &Self::Create) -> Result<DbId, sqlx::Error>;

    /// Load associations into freshly fetched rows.
    async fn hydrate(_pool: &PgPool, _records: &mut [Self::Record]) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn sync_created(
        _pool: &PgPool,
        _id: DbId,
        _input: &Self::Create,
    ) -> Result<(), sqlx::Error> {
        Ok(())
    }

    /// Only called when [`Entity::touches_associations`] is true.
    async fn sync_updated(
        _pool: &PgPool,
        _id: DbId,
        _input: &Self::Update,
    ) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
