//! Unauthenticated read endpoints for the public site.
//!
//! Listings are wrapped by the read-through cache in the router; slug
//! lookups are served directly.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use itam_db::entity::Entity;
use itam_db::repositories::{CrudRepo, StatRepo};

use crate::engine::CrudService;
use crate::error::AppResult;
use crate::extract::AppPath;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/public/{resource}
pub async fn list<E: Entity>(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<E::Record>>>> {
    let items = CrudService::<E>::from_state(&state).list_public().await?;
    Ok(Json(DataResponse::new(items)))
}

/// GET /api/v1/public/{resource}/{slug}
pub async fn get_by_slug<E: Entity>(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> AppResult<Json<DataResponse<E::Record>>> {
    let record = CrudService::<E>::from_state(&state).get_by_slug(&slug).await?;
    Ok(Json(DataResponse::new(record)))
}

/// GET /api/v1/public/stats
///
/// Visible stats as a `key -> value` map.
pub async fn stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<BTreeMap<String, String>>>> {
    let stats = CrudRepo::list_public::<StatRepo>(&state.pool).await?;
    let map = stats.into_iter().map(|s| (s.key, s.value)).collect();
    Ok(Json(DataResponse::new(map)))
}
