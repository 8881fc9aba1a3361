//! Admin handlers shared by every content entity.
//!
//! Each handler is generic over the [`Entity`]; routes instantiate them per
//! resource, e.g. `get(crud::list::<WinRepo>)`. All require an editor or
//! admin.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use itam_core::pagination::{PageRequest, Paginated};
use itam_core::types::DbId;
use itam_db::entity::Entity;
use itam_db::models::ReorderRequest;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::engine::CrudService;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::{Actor, RequireAuth};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// `?page=&page_size=`; normalized by [`PageRequest::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageParams {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// GET /api/v1/{resource}
pub async fn list<E>(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(filter): AppQuery<E::Filter>,
) -> AppResult<Json<DataResponse<Paginated<E::Record>>>>
where
    E: Entity,
    E::Filter: DeserializeOwned,
{
    let result = CrudService::<E>::from_state(&state)
        .list(&filter, page.request())
        .await?;
    Ok(Json(DataResponse::new(result)))
}

/// GET /api/v1/{resource}/{id}
pub async fn get_by_id<E: Entity>(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<E::Record>>> {
    let record = CrudService::<E>::from_state(&state).get_by_id(id).await?;
    Ok(Json(DataResponse::new(record)))
}

/// POST /api/v1/{resource}
pub async fn create<E>(
    State(state): State<AppState>,
    actor: Actor,
    AppJson(input): AppJson<E::Create>,
) -> AppResult<(StatusCode, Json<DataResponse<E::Record>>)>
where
    E: Entity,
    E::Create: DeserializeOwned,
{
    let record = CrudService::<E>::from_state(&state)
        .create(&input, &actor.audit)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(record))))
}

/// PUT /api/v1/{resource}/{id}
pub async fn update<E>(
    State(state): State<AppState>,
    actor: Actor,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<E::Update>,
) -> AppResult<Json<DataResponse<E::Record>>>
where
    E: Entity,
    E::Update: DeserializeOwned,
{
    let record = CrudService::<E>::from_state(&state)
        .update(id, &input, &actor.audit)
        .await?;
    Ok(Json(DataResponse::new(record)))
}

/// DELETE /api/v1/{resource}/{id}
pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    actor: Actor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    CrudService::<E>::from_state(&state)
        .delete(id, &actor.audit)
        .await?;
    Ok(Json(DataResponse::new(MessageResponse::new(format!(
        "{} deleted",
        E::LABEL
    )))))
}

/// PUT /api/v1/{resource}/reorder
pub async fn reorder<E: Entity>(
    State(state): State<AppState>,
    actor: Actor,
    AppJson(input): AppJson<ReorderRequest>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    CrudService::<E>::from_state(&state)
        .reorder(&input.ids, &actor.audit)
        .await?;
    Ok(Json(DataResponse::new(MessageResponse::new("reordered"))))
}
