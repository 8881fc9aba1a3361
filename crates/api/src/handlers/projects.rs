//! Project-specific admin endpoints.

use axum::extract::State;
use axum::Json;
use itam_db::models::project::Tag;
use itam_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/tags
pub async fn list_tags(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(tags)))
}
