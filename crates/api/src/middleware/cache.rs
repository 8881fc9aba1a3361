//! Read-through response cache for public GET endpoints.
//!
//! A hit is served straight from the cache without running the handler. On
//! a miss the handler runs and a 2xx body is stored under the route's key.
//! Mutations invalidate keys explicitly; see the CRUD engine.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::cache::CacheHandle;
use crate::error::AppError;

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

const HIT: HeaderValue = HeaderValue::from_static("HIT");
const MISS: HeaderValue = HeaderValue::from_static("MISS");

/// Middleware state: the cache plus the key one route is stored under.
#[derive(Clone)]
pub struct CachedRoute {
    pub cache: CacheHandle,
    pub key: &'static str,
}

impl CachedRoute {
    pub fn new(cache: CacheHandle, key: &'static str) -> Self {
        Self { cache, key }
    }
}

/// Use with `axum::middleware::from_fn_with_state(CachedRoute::new(..), read_through)`.
pub async fn read_through(
    State(route): State<CachedRoute>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    if let Some(bytes) = route.cache.get(route.key).await {
        tracing::debug!(key = route.key, "Cache hit");
        let mut response = Response::new(Body::from(bytes));
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(X_CACHE, HIT);
        return response;
    }

    let response = next.run(request).await;
    if !response.status().is_success() {
        let mut response = response;
        response.headers_mut().insert(X_CACHE, MISS);
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return AppError::InternalError(format!("Failed to buffer response body: {e}"))
                .into_response();
        }
    };

    route.cache.set(route.key, bytes.to_vec()).await;
    parts.headers.insert(X_CACHE, MISS);
    Response::from_parts(parts, Body::from(bytes))
}
