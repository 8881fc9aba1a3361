//! Best-effort audit trail writer.

use itam_core::audit::{redact_sensitive_fields, AuditActor};
use itam_core::types::DbId;
use itam_db::models::audit::CreateAuditLog;
use itam_db::repositories::AuditRepo;
use itam_db::DbPool;
use serde_json::Value;

/// Appends audit entries. A failed write is logged and swallowed; it never
/// fails or rolls back the mutation it describes.
#[derive(Clone)]
pub struct AuditLogger {
    pool: DbPool,
}

impl AuditLogger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn record(
        &self,
        actor: &AuditActor,
        action: &str,
        entity_type: &str,
        entity_id: Option<DbId>,
        changes: Option<Value>,
    ) {
        let changes = changes.map(|c| redact_sensitive_fields(&c));
        let entry = CreateAuditLog::new(actor, action, entity_type, entity_id, changes);
        if let Err(e) = AuditRepo::insert(&self.pool, &entry).await {
            tracing::error!(
                error = %e,
                action,
                entity_type,
                entity_id,
                "Failed to write audit entry"
            );
        }
    }
}
