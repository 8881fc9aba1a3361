#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use itam_api::auth::jwt::{generate_access_token, JwtConfig};
use itam_api::auth::password::hash_password;
use itam_api::cache::CacheHandle;
use itam_api::config::ServerConfig;
use itam_api::router::build_app_router;
use itam_api::state::AppState;
use itam_core::cache::MemoryCache;
use itam_db::entity::Entity;
use itam_db::models::user::CreateUser;
use itam_db::repositories::UserRepo;
use itam_db::PoolSettings;

pub const TEST_PASSWORD: &str = "test-password-123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough".to_string(),
        expiry_hours: 1,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        db_pool: PoolSettings::default(),
        cache_ttl_secs: 300,
        cache_sweep_interval_secs: 60,
        jwt: test_jwt_config(),
        admin_seed: None,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    let config = test_config();
    let cache = CacheHandle::new(Arc::new(MemoryCache::new()), config.cache_ttl());
    AppState {
        pool,
        config: Arc::new(config),
        cache,
    }
}

/// Build the full application router with a fresh in-memory cache.
///
/// The returned router is cheap to clone; clones share the cache, so cache
/// behavior is observable across requests sent through clones.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(test_state(pool), &test_config())
}

/// Insert an active user with [`TEST_PASSWORD`] and return its id and a
/// valid bearer token.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> (i64, String) {
    let input = CreateUser {
        email: email.to_string(),
        name: "Test User".to_string(),
        role: role.to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
    };
    let id = UserRepo::insert(pool, &input).await.unwrap();
    let token = generate_access_token(id, role, &test_jwt_config()).unwrap();
    (id, token)
}

pub async fn admin_token(pool: &PgPool) -> String {
    seed_user(pool, "admin@test.com", "admin").await.1
}

pub async fn editor_token(pool: &PgPool) -> String {
    seed_user(pool, "editor@test.com", "editor").await.1
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a single-file multipart upload under the field name `field`.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    field: &str,
    contents: &str,
    token: &str,
) -> Response {
    let boundary = "itam-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"upload.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {contents}\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
