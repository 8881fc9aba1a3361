//! Audit logging constants and payload helpers.
//!
//! Audit entries are append-only. The helpers here only shape the JSON
//! payload; persistence lives in the database crate.

use serde::Serialize;
use serde_json::{json, Value};

use crate::types::DbId;

/// Action kinds stored in `audit_logs.action`.
pub mod actions {
    pub const CREATE: &str = "CREATE";
    pub const UPDATE: &str = "UPDATE";
    pub const DELETE: &str = "DELETE";

    pub const ALL: &[&str] = &[CREATE, UPDATE, DELETE];
}

/// Entity type tags stored in `audit_logs.entity_type`.
pub mod entity_types {
    pub const WIN: &str = "win";
    pub const PROJECT: &str = "project";
    pub const TEAM: &str = "team";
    pub const NEWS: &str = "news";
    pub const PARTNER: &str = "partner";
    pub const CLUB: &str = "club";
    pub const BLOG: &str = "blog";
    pub const STAT: &str = "stat";
    pub const USER: &str = "user";
}

/// Values of the `action` key inside aggregate payloads.
pub mod payload_actions {
    pub const BULK_IMPORT: &str = "bulk_import";
    pub const REORDER: &str = "reorder";
}

/// Who performed a mutation and where the request came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditActor {
    /// `None` for system actions (seeding, maintenance).
    pub actor_id: Option<DbId>,
    pub origin: Option<String>,
}

impl AuditActor {
    pub fn new(actor_id: DbId, origin: Option<String>) -> Self {
        Self {
            actor_id: Some(actor_id),
            origin,
        }
    }

    pub fn system() -> Self {
        Self::default()
    }
}

/// Serialize a record snapshot, redacting sensitive keys.
///
/// Serialization failures produce `None`; a missing payload never blocks the
/// mutation it describes.
pub fn snapshot<T: Serialize>(record: &T) -> Option<Value> {
    serde_json::to_value(record)
        .ok()
        .map(|v| redact_sensitive_fields(&v))
}

/// `{before, after}` payload for UPDATE entries.
pub fn update_payload<T: Serialize>(before: &T, after: &T) -> Option<Value> {
    Some(json!({
        "before": snapshot(before),
        "after": snapshot(after),
    }))
}

/// Payload for a single UPDATE entry describing a reorder.
pub fn reorder_payload(ids: &[DbId]) -> Value {
    json!({
        "action": payload_actions::REORDER,
        "ids": ids,
    })
}

/// Payload for the aggregate CREATE entry written after a bulk import.
pub fn bulk_import_payload(total: usize, imported: usize, skipped: usize) -> Value {
    json!({
        "action": payload_actions::BULK_IMPORT,
        "total": total,
        "imported": imported,
        "skipped": skipped,
    })
}

/// Keys whose values are replaced before a payload is stored.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "api_key",
    "authorization",
    "credential",
];

/// Replace the value of any object key containing one of
/// [`SENSITIVE_FIELDS`] with `"[REDACTED]"`, recursing into nested objects
/// and arrays.
pub fn redact_sensitive_fields(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, val) in map {
                let lower_key = key.to_lowercase();
                if SENSITIVE_FIELDS.iter().any(|f| lower_key.contains(f)) {
                    redacted.insert(key.clone(), Value::String("[REDACTED]".to_string()));
                } else {
                    redacted.insert(key.clone(), redact_sensitive_fields(val));
                }
            }
            Value::Object(redacted)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(redact_sensitive_fields).collect()),
        other => other.clone(),
    }
}
