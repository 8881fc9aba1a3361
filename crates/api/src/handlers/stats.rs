//! Stat lookups by their stable key.

use axum::extract::State;
use axum::Json;
use itam_core::error::CoreError;
use itam_db::entity::Entity;
use itam_db::models::stat::{Stat, UpdateStat};
use itam_db::repositories::StatRepo;

use crate::engine::CrudService;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{Actor, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_by_key(state: &AppState, key: &str) -> AppResult<Stat> {
    StatRepo::find_by_key(&state.pool, key).await?.ok_or_else(|| {
        CoreError::NotFoundByKey {
            entity: StatRepo::LABEL,
            key: key.to_string(),
        }
        .into()
    })
}

/// GET /api/v1/stats/key/{key}
pub async fn get_by_key(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(key): AppPath<String>,
) -> AppResult<Json<DataResponse<Stat>>> {
    let stat = find_by_key(&state, &key).await?;
    Ok(Json(DataResponse::new(stat)))
}

/// PUT /api/v1/stats/key/{key}
pub async fn update_by_key(
    State(state): State<AppState>,
    actor: Actor,
    AppPath(key): AppPath<String>,
    AppJson(input): AppJson<UpdateStat>,
) -> AppResult<Json<DataResponse<Stat>>> {
    let stat = find_by_key(&state, &key).await?;
    let updated = CrudService::<StatRepo>::from_state(&state)
        .update(stat.id, &input, &actor.audit)
        .await?;
    Ok(Json(DataResponse::new(updated)))
}
