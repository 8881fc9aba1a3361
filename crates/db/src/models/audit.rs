//! Audit log entity model and DTOs.

use chrono::NaiveDate;
use itam_core::audit::AuditActor;
use itam_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `audit_logs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub changes: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending an audit entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub user_id: Option<DbId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub changes: Option<serde_json::Value>,
    pub ip_address: Option<String>,
}

impl CreateAuditLog {
    pub fn new(
        actor: &AuditActor,
        action: &str,
        entity_type: &str,
        entity_id: Option<DbId>,
        changes: Option<serde_json::Value>,
    ) -> Self {
        Self {
            user_id: actor.actor_id,
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            changes,
            ip_address: actor.origin.clone(),
        }
    }
}

/// Query parameters for `GET /admin/audit-logs`. Both dates are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub user_id: Option<DbId>,
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
