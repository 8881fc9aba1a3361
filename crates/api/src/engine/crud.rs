//! Generic CRUD service.
//!
//! [`CrudService`] runs every entity mutation through the same sequence:
//! validate, write, sync associations, audit, invalidate cached public
//! listings. Reads go straight to [`CrudRepo`].

use std::marker::PhantomData;

use itam_core::audit::{self, actions, AuditActor};
use itam_core::error::CoreError;
use itam_core::pagination::{PageRequest, Paginated};
use itam_core::types::DbId;
use itam_db::entity::Entity;
use itam_db::query::{is_foreign_key_violation, is_unique_violation};
use itam_db::repositories::CrudRepo;
use itam_db::DbPool;

use super::audit::AuditLogger;
use crate::cache::CacheHandle;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub struct CrudService<E: Entity> {
    pool: DbPool,
    cache: CacheHandle,
    audit: AuditLogger,
    _entity: PhantomData<fn() -> E>,
}

/// Translate constraint violations into domain errors.
fn storage_error<E: Entity>(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        return CoreError::Conflict(E::CONFLICT_MESSAGE.to_string()).into();
    }
    if is_foreign_key_violation(&err) {
        return CoreError::Validation(format!(
            "{} references a record that does not exist",
            E::LABEL
        ))
        .into();
    }
    AppError::Database(err)
}

impl<E: Entity> CrudService<E> {
    pub fn new(pool: DbPool, cache: CacheHandle) -> Self {
        let audit = AuditLogger::new(pool.clone());
        Self {
            pool,
            cache,
            audit,
            _entity: PhantomData,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.pool.clone(), state.cache.clone())
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub async fn list(
        &self,
        filter: &E::Filter,
        page: PageRequest,
    ) -> AppResult<Paginated<E::Record>> {
        let (items, total) = CrudRepo::list::<E>(&self.pool, filter, page).await?;
        Ok(Paginated::new(items, total, page))
    }

    pub async fn list_public(&self) -> AppResult<Vec<E::Record>> {
        Ok(CrudRepo::list_public::<E>(&self.pool).await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<E::Record> {
        CrudRepo::find_by_id::<E>(&self.pool, id)
            .await?
            .ok_or_else(|| not_found::<E>(id))
    }

    /// Publicly visible record by slug.
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<E::Record> {
        CrudRepo::find_public_by_slug::<E>(&self.pool, slug)
            .await?
            .ok_or_else(|| {
                CoreError::NotFoundByKey {
                    entity: E::LABEL,
                    key: slug.to_string(),
                }
                .into()
            })
    }

    pub async fn create(&self, input: &E::Create, actor: &AuditActor) -> AppResult<E::Record> {
        let id = self.insert_without_audit(input).await?;
        let record = self.get_by_id(id).await?;

        self.audit
            .record(actor, actions::CREATE, E::KIND, Some(id), audit::snapshot(&record))
            .await;
        self.invalidate_cache().await;

        tracing::info!(entity = E::KIND, id, "Record created");
        Ok(record)
    }

    /// Validate, insert and sync associations. No audit entry and no cache
    /// invalidation; bulk callers do both once for the whole batch.
    pub async fn insert_without_audit(&self, input: &E::Create) -> AppResult<DbId> {
        E::validate_create(input)?;
        let id = E::insert(&self.pool, input)
            .await
            .map_err(storage_error::<E>)?;
        E::sync_created(&self.pool, id, input)
            .await
            .map_err(storage_error::<E>)?;
        Ok(id)
    }

    /// Sparse update. An update that sets nothing and carries no
    /// association data returns the current record without writing or
    /// auditing.
    pub async fn update(
        &self,
        id: DbId,
        input: &E::Update,
        actor: &AuditActor,
    ) -> AppResult<E::Record> {
        E::validate_update(input)?;
        let before = self.get_by_id(id).await?;

        let changes = E::changes(&before, input)?;
        let touches_associations = E::touches_associations(input);
        if changes.is_empty() && !touches_associations {
            return Ok(before);
        }

        if !changes.is_empty() {
            let updated = CrudRepo::update::<E>(&self.pool, id, &changes)
                .await
                .map_err(storage_error::<E>)?;
            if !updated {
                return Err(not_found::<E>(id));
            }
        }

        if touches_associations {
            E::sync_updated(&self.pool, id, input)
                .await
                .map_err(storage_error::<E>)?;
            if changes.is_empty() {
                CrudRepo::touch::<E>(&self.pool, id).await?;
            }
        }

        let after = self.get_by_id(id).await?;
        self.audit
            .record(
                actor,
                actions::UPDATE,
                E::KIND,
                Some(id),
                audit::update_payload(&before, &after),
            )
            .await;
        self.invalidate_cache().await;

        tracing::info!(entity = E::KIND, id, fields = ?changes.columns(), "Record updated");
        Ok(after)
    }

    pub async fn delete(&self, id: DbId, actor: &AuditActor) -> AppResult<()> {
        let existing = self.get_by_id(id).await?;
        let deleted = CrudRepo::delete::<E>(&self.pool, id)
            .await
            .map_err(storage_error::<E>)?;
        if !deleted {
            return Err(not_found::<E>(id));
        }

        self.audit
            .record(actor, actions::DELETE, E::KIND, Some(id), audit::snapshot(&existing))
            .await;
        self.invalidate_cache().await;

        tracing::info!(entity = E::KIND, id, "Record deleted");
        Ok(())
    }

    /// Assign descending positions in list order. Unknown ids are ignored.
    pub async fn reorder(&self, ids: &[DbId], actor: &AuditActor) -> AppResult<()> {
        if ids.is_empty() {
            return Err(CoreError::Validation("ids must not be empty".into()).into());
        }
        let updated = CrudRepo::reorder::<E>(&self.pool, ids).await?;

        self.audit
            .record(
                actor,
                actions::UPDATE,
                E::KIND,
                None,
                Some(audit::reorder_payload(ids)),
            )
            .await;
        self.invalidate_cache().await;

        tracing::info!(entity = E::KIND, requested = ids.len(), updated, "Records reordered");
        Ok(())
    }

    pub async fn invalidate_cache(&self) {
        self.cache.invalidate(E::CACHE_KEYS).await;
    }
}

fn not_found<E: Entity>(id: DbId) -> AppError {
    CoreError::NotFound {
        entity: E::LABEL,
        id,
    }
    .into()
}
