use chrono::Utc;
use itam_core::audit::{actions, entity_types, AuditActor};
use itam_core::pagination::PageRequest;
use itam_db::models::audit::{AuditQuery, CreateAuditLog};
use itam_db::repositories::AuditRepo;
use serde_json::json;
use sqlx::PgPool;

fn entry(action: &str, entity_type: &str, entity_id: Option<i64>) -> CreateAuditLog {
    CreateAuditLog::new(
        &AuditActor::new(1, Some("10.0.0.1".to_string())),
        action,
        entity_type,
        entity_id,
        Some(json!({"name": "x"})),
    )
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_returns_stored_entry(pool: PgPool) {
    let log = AuditRepo::insert(&pool, &entry(actions::CREATE, entity_types::WIN, Some(5)))
        .await
        .unwrap();
    assert_eq!(log.user_id, Some(1));
    assert_eq!(log.entity_id, Some(5));
    assert_eq!(log.ip_address.as_deref(), Some("10.0.0.1"));
    assert_eq!(log.changes, Some(json!({"name": "x"})));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_newest_first(pool: PgPool) {
    AuditRepo::insert(&pool, &entry(actions::CREATE, entity_types::WIN, Some(1))).await.unwrap();
    AuditRepo::insert(&pool, &entry(actions::UPDATE, entity_types::WIN, Some(1))).await.unwrap();
    AuditRepo::insert(&pool, &entry(actions::DELETE, entity_types::NEWS, Some(2))).await.unwrap();

    let params = AuditQuery {
        entity_type: Some(entity_types::WIN.to_string()),
        ..Default::default()
    };
    let (items, total) = AuditRepo::list(&pool, &params, PageRequest::default()).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].action, actions::UPDATE);
    assert_eq!(items[1].action, actions::CREATE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_date_range(pool: PgPool) {
    AuditRepo::insert(&pool, &entry(actions::CREATE, entity_types::BLOG, None)).await.unwrap();

    let today = Utc::now().date_naive();
    let params = AuditQuery {
        date_from: today.pred_opt(),
        date_to: today.succ_opt(),
        ..Default::default()
    };
    let (_, total) = AuditRepo::list(&pool, &params, PageRequest::default()).await.unwrap();
    assert_eq!(total, 1);

    let past = AuditQuery {
        date_to: today.pred_opt().and_then(|d| d.pred_opt()),
        ..Default::default()
    };
    let (_, total) = AuditRepo::list(&pool, &past, PageRequest::default()).await.unwrap();
    assert_eq!(total, 0);
}
