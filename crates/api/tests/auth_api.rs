//! Login, current user, role enforcement and admin user management.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth, TEST_PASSWORD};
use itam_api::bootstrap::seed_admin;
use itam_api::config::AdminSeed;
use itam_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_token_and_user(pool: PgPool) {
    let (id, _) = common::seed_user(&pool, "editor@test.com", "editor").await;
    let app = common::build_test_app(pool);

    let body = json!({"email": "Editor@Test.com", "password": TEST_PASSWORD});
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["data"]["access_token"].as_str().unwrap().to_string();
    assert_eq!(json["data"]["expires_in"], 3600);
    assert_eq!(json["data"]["user"]["id"], id);
    assert_eq!(json["data"]["user"]["role"], "editor");
    assert!(json["data"]["user"].get("password_hash").is_none());

    let me = body_json(get_auth(app, "/api/v1/auth/me", &token).await).await;
    assert_eq!(me["data"]["email"], "editor@test.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_email_are_unauthorized(pool: PgPool) {
    common::seed_user(&pool, "editor@test.com", "editor").await;
    let app = common::build_test_app(pool);

    let wrong = json!({"email": "editor@test.com", "password": "not-the-password"});
    let response = post_json(app.clone(), "/api/v1/auth/login", wrong).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let unknown = json!({"email": "nobody@test.com", "password": TEST_PASSWORD});
    let response = post_json(app, "/api/v1/auth/login", unknown).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_account_cannot_log_in_or_use_its_token(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let (editor_id, editor_token) = common::seed_user(&pool, "editor@test.com", "editor").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/users/{editor_id}"),
        json!({"is_active": false}),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json!({"email": "editor@test.com", "password": TEST_PASSWORD});
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/wins", &editor_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn editors_cannot_manage_users(pool: PgPool) {
    let token = common::editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"]["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_editor_by_default(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({"email": "new@test.com", "password": "long-enough-1", "name": "New"});
    let response = post_json_auth(app.clone(), "/api/v1/users", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["role"], "editor");

    let response = post_json_auth(app, "/api/v1/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"]["message"],
        "A user with this email already exists"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn short_password_is_rejected(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({"email": "new@test.com", "password": "short", "name": "New"});
    let response = post_json_auth(app, "/api/v1/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"]["message"],
        "password must be at least 8 characters"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_cannot_delete_or_demote_themselves(pool: PgPool) {
    let (admin_id, token) = common::seed_user(&pool, "admin@test.com", "admin").await;
    let app = common::build_test_app(pool);

    let response = delete_auth(app.clone(), &format!("/api/v1/users/{admin_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        &format!("/api/v1/users/{admin_id}"),
        json!({"role": "editor"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_admin_token_stops_working(pool: PgPool) {
    let (first_id, first_token) = common::seed_user(&pool, "first@test.com", "admin").await;
    let (second_id, second_token) = common::seed_user(&pool, "second@test.com", "admin").await;
    let app = common::build_test_app(pool.clone());

    let response = delete_auth(app.clone(), &format!("/api/v1/users/{second_id}"), &first_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(UserRepo::count_active_admins(&pool).await.unwrap(), 1);

    let response = delete_auth(app, &format!("/api/v1/users/{first_id}"), &second_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn password_change_takes_effect(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let (editor_id, _) = common::seed_user(&pool, "editor@test.com", "editor").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/users/{editor_id}"),
        json!({"password": "brand-new-secret"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json!({"email": "editor@test.com", "password": "brand-new-secret"});
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Bootstrap admin
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_seed_is_created_once(pool: PgPool) {
    let state = common::test_state(pool.clone());
    let seed = AdminSeed {
        email: "root@test.com".into(),
        password: "bootstrap-pass".into(),
        name: "Admin".into(),
    };

    assert!(seed_admin(&state, &seed).await.unwrap());
    assert!(!seed_admin(&state, &seed).await.unwrap());

    let user = UserRepo::find_by_email(&pool, "root@test.com").await.unwrap().unwrap();
    assert_eq!(user.role, "admin");
    assert!(user.is_active);
}
