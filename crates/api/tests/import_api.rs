//! CSV import of wins over multipart upload.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_file_auth};
use itam_core::pagination::PageRequest;
use itam_db::models::audit::AuditQuery;
use itam_db::repositories::AuditRepo;
use serde_json::json;
use sqlx::PgPool;

const HEADER: &str = "team;hackathon;result;prize;award_date;year;link";

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_keeps_good_rows_and_reports_bad_ones(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let csv = format!(
        "{HEADER}\n\
         Alpha;Big Hack;1st;1 500 000 ₽;05.03.2024;2024;https://x.io\n\
         ;Big Hack;2nd;100;;2024\n\
         Gamma;Small Hack;3rd;250,000;2023-11-20;2023\n"
    );
    let response = post_file_auth(app.clone(), "/api/v1/wins/import", "file", &csv, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 3);
    assert_eq!(json["data"]["imported"], 2);
    assert_eq!(json["data"]["skipped"], 1);
    assert_eq!(
        json["data"]["errors"],
        json!([{"row": 3, "message": "team_name is required"}])
    );

    let list = body_json(get_auth(app, "/api/v1/wins", &token).await).await;
    assert_eq!(list["data"]["total"], 2);

    let query = AuditQuery {
        entity_type: Some("win".into()),
        ..Default::default()
    };
    let (entries, total) = AuditRepo::list(&pool, &query, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(entries[0].action, "CREATE");
    assert_eq!(entries[0].entity_id, None);
    assert_eq!(
        entries[0].changes,
        Some(json!({"action": "bulk_import", "total": 3, "imported": 2, "skipped": 1}))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_refreshes_the_public_listing(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let empty = body_json(get(app.clone(), "/api/v1/public/wins").await).await;
    assert_eq!(empty["data"], json!([]));

    let csv = format!("{HEADER}\nAlpha;Hack;1st;100;;2024\n");
    post_file_auth(app.clone(), "/api/v1/wins/import", "file", &csv, &token).await;

    let after = body_json(get(app, "/api/v1/public/wins").await).await;
    assert_eq!(after["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn narrow_header_fails_the_whole_import(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let csv = "team;hackathon;result\nAlpha;Hack;1st\n";
    let response = post_file_auth(app.clone(), "/api/v1/wins/import", "file", csv, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");

    let list = body_json(get_auth(app, "/api/v1/wins", &token).await).await;
    assert_eq!(list["data"]["total"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_without_file_field_is_a_bad_request(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let csv = format!("{HEADER}\nAlpha;Hack;1st;100;;2024\n");
    let response = post_file_auth(app, "/api/v1/wins/import", "document", &csv, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
}
