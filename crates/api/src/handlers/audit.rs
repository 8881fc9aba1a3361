//! Audit log browsing (admin only).

use axum::extract::State;
use axum::Json;
use itam_core::pagination::{PageRequest, Paginated};
use itam_db::models::audit::{AuditLog, AuditQuery};
use itam_db::repositories::AuditRepo;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/audit-logs
///
/// Filters: `user_id`, `action`, `entity_type`, `date_from`, `date_to`
/// (inclusive, `YYYY-MM-DD`), plus `page` / `page_size`.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<AuditQuery>,
) -> AppResult<Json<DataResponse<Paginated<AuditLog>>>> {
    let page = PageRequest::new(params.page, params.page_size);
    let (items, total) = AuditRepo::list(&state.pool, &params, page).await?;
    Ok(Json(DataResponse::new(Paginated::new(items, total, page))))
}
