//! HTTP-level integration tests for the admin content endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

fn win(team: &str, year: i32) -> serde_json::Value {
    json!({
        "team_name": team,
        "hackathon_name": "Big Hack",
        "result": "1st place",
        "prize": 100000,
        "award_date": "15.03.2024",
        "year": year,
    })
}

async fn create_win(app: axum::Router, token: &str, team: &str, year: i32) -> i64 {
    let response = post_json_auth(app, "/api/v1/wins", win(team, year), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Generic CRUD (wins)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_win_returns_201_with_envelope(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/wins", win("Alpha", 2024), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["error"].is_null());
    assert_eq!(json["data"]["team_name"], "Alpha");
    assert_eq!(json["data"]["award_date"], "2024-03-15");
    assert_eq!(json["data"]["is_visible"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post_json(app, "/api/v1/wins", win("Alpha", 2024)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert!(json["data"].is_null());
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_required_field_is_a_validation_error(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({"hackathon_name": "Hack", "result": "1st", "year": 2024});
    let response = post_json_auth(app, "/api/v1/wins", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["message"], "team_name is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_changes_only_supplied_fields(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = create_win(app.clone(), &token, "Alpha", 2024).await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/wins/{id}"),
        json!({"result": "2nd place"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["result"], "2nd place");
    assert_eq!(json["data"]["team_name"], "Alpha");
    assert_eq!(json["data"]["prize"], 100000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_returns_message_then_404(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = create_win(app.clone(), &token, "Alpha", 2024).await;

    let response = delete_auth(app.clone(), &format!("/api/v1/wins/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["message"], "Win deleted");

    let response = get_auth(app, &format!("/api/v1/wins/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], format!("Win with id {id} not found"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_delete_is_not_found(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = create_win(app.clone(), &token, "Alpha", 2024).await;

    let response = delete_auth(app.clone(), &format!("/api/v1/wins/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(app, &format!("/api/v1/wins/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_update_of_missing_row_is_a_validation_error(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(app, "/api/v1/wins/999", json!({"team_name": ""}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_update_returns_record_unchanged_without_audit(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = create_win(app.clone(), &token, "Alpha", 2024).await;
    let uri = format!("/api/v1/wins/{id}");

    let before = body_json(get_auth(app.clone(), &uri, &token).await).await;

    for body in [json!({}), json!({"colour": "red"})] {
        let response = put_json_auth(app.clone(), &uri, body, &token).await;
        assert_eq!(response.status(), StatusCode::OK);
        let after = body_json(response).await;
        assert_eq!(after["data"], before["data"]);
    }

    let json = body_json(
        get_auth(app, "/api/v1/admin/audit-logs?entity_type=win", &token).await,
    )
    .await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["action"], "CREATE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_trims_required_text(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = create_win(app.clone(), &token, "Alpha", 2024).await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/wins/{id}"),
        json!({"team_name": "  Beta "}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["team_name"], "Beta");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn page_far_past_the_end_is_empty(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    create_win(app.clone(), &token, "Alpha", 2024).await;

    let response = get_auth(app, &format!("/api/v1/wins?page={}", i64::MAX), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_paginated_and_filtered(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    for (team, year) in [("Alpha", 2023), ("Beta", 2024), ("Gamma", 2024)] {
        create_win(app.clone(), &token, team, year).await;
    }

    let response = get_auth(app.clone(), "/api/v1/wins?year=2024&page_size=1", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["total_pages"], 2);
    assert_eq!(json["data"]["page_size"], 1);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);

    let response = get_auth(app, "/api/v1/wins?search=alp", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["team_name"], "Alpha");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_puts_first_id_on_top(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let a = create_win(app.clone(), &token, "Alpha", 2024).await;
    let b = create_win(app.clone(), &token, "Beta", 2024).await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/wins/reorder",
        json!({"ids": [b, a]}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["message"], "reordered");

    let json = body_json(get_auth(app, "/api/v1/wins", &token).await).await;
    assert_eq!(json["data"]["items"][0]["id"], b);
    assert_eq!(json["data"]["items"][1]["id"], a);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_with_no_ids_is_rejected(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(app, "/api/v1/wins/reorder", json!({"ids": []}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Win extras
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn win_years_are_distinct_and_newest_first(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    for (team, year) in [("A", 2022), ("B", 2024), ("C", 2024)] {
        create_win(app.clone(), &token, team, year).await;
    }

    let json = body_json(get_auth(app, "/api/v1/wins/years", &token).await).await;
    assert_eq!(json["data"], json!([2024, 2022]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn win_stats_sum_prizes(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    create_win(app.clone(), &token, "A", 2022).await;
    create_win(app.clone(), &token, "B", 2023).await;

    let json = body_json(get_auth(app, "/api/v1/wins/stats", &token).await).await;
    assert_eq!(json["data"]["total_wins"], 2);
    assert_eq!(json["data"]["total_prize"], 200000);
}

// ---------------------------------------------------------------------------
// Slugs, tags, conflicts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_slug_is_generated_and_duplicates_conflict(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({"title": "Мой Проект", "tag_names": ["rust", "web"]});
    let response = post_json_auth(app.clone(), "/api/v1/projects", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "moy-proekt");
    assert_eq!(json["data"]["tags"].as_array().unwrap().len(), 2);

    let response = post_json_auth(app.clone(), "/api/v1/projects", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["error"]["message"], "A project with this slug already exists");

    let json = body_json(get_auth(app, "/api/v1/projects/tags", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_tags_survive_unrelated_updates_and_clear_on_empty_list(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({"title": "Tagged", "tag_names": ["rust", "web"]});
    let created = body_json(post_json_auth(app.clone(), "/api/v1/projects", body, &token).await).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/projects/{id}");

    let response = put_json_auth(app.clone(), &uri, json!({"title": "Retitled"}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Retitled");
    assert_eq!(json["data"]["tags"], created["data"]["tags"]);

    let response = put_json_auth(app, &uri, json!({"tag_names": []}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["tags"], json!([]));
    assert_eq!(json["data"]["title"], "Retitled");
}

// ---------------------------------------------------------------------------
// Stats by key
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn stat_can_be_read_and_updated_by_key(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({"key": "students", "value": "500+", "label": "Students"});
    let response = post_json_auth(app.clone(), "/api/v1/stats", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/stats/key/students",
        json!({"value": "600+"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app.clone(), "/api/v1/stats/key/students", &token).await).await;
    assert_eq!(json["data"]["value"], "600+");

    let response = get_auth(app, "/api/v1/stats/key/missing", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"]["message"],
        "Stat 'missing' not found"
    );
}

// ---------------------------------------------------------------------------
// Public surface
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn public_listing_hides_invisible_rows(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    create_win(app.clone(), &token, "Shown", 2024).await;
    let mut hidden = win("Hidden", 2024);
    hidden["is_visible"] = json!(false);
    post_json_auth(app.clone(), "/api/v1/wins", hidden, &token).await;

    let json = body_json(get(app, "/api/v1/public/wins").await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["team_name"], "Shown");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn public_slug_lookup_requires_published(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    post_json_auth(
        app.clone(),
        "/api/v1/blog",
        json!({"title": "Draft Post"}),
        &token,
    )
    .await;
    post_json_auth(
        app.clone(),
        "/api/v1/blog",
        json!({"title": "Live Post", "is_published": true}),
        &token,
    )
    .await;

    let response = get(app.clone(), "/api/v1/public/blog/draft-post").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/v1/public/blog/live-post").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Live Post");
    assert!(json["data"]["published_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn public_stats_are_a_key_value_map(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);
    for (key, value) in [("students", "500+"), ("clubs", "12")] {
        post_json_auth(
            app.clone(),
            "/api/v1/stats",
            json!({"key": key, "value": value}),
            &token,
        )
        .await;
    }

    let json = body_json(get(app, "/api/v1/public/stats").await).await;
    assert_eq!(json["data"], json!({"clubs": "12", "students": "500+"}));
}
