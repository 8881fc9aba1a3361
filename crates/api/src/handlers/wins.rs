//! Win-specific admin endpoints beyond the generic CRUD set.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use chrono::{Datelike, Utc};
use itam_core::csv_import::ImportReport;
use itam_core::error::CoreError;
use itam_db::models::win::WinStats;
use itam_db::repositories::WinRepo;

use crate::engine::import::import_wins;
use crate::engine::CrudService;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Actor, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the CSV file.
const FILE_FIELD: &str = "file";

/// GET /api/v1/wins/years
pub async fn years(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<i32>>>> {
    let years = WinRepo::years(&state.pool).await?;
    Ok(Json(DataResponse::new(years)))
}

/// GET /api/v1/wins/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<WinStats>>> {
    let stats = WinRepo::stats(&state.pool, Utc::now().year()).await?;
    Ok(Json(DataResponse::new(stats)))
}

/// POST /api/v1/wins/import
///
/// Multipart upload with a `file` field holding `;`-separated rows.
pub async fn import(
    State(state): State<AppState>,
    actor: Actor,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<DataResponse<ImportReport>>> {
    let mut multipart = multipart?;

    let mut data = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            data = Some(field.bytes().await?);
            break;
        }
    }
    let data = data.ok_or_else(|| AppError::BadRequest(format!("Missing '{FILE_FIELD}' field")))?;
    if data.is_empty() {
        return Err(CoreError::Validation("CSV file is empty".into()).into());
    }

    let service = CrudService::<WinRepo>::from_state(&state);
    let report = import_wins(&service, &data, &actor.audit).await?;
    Ok(Json(DataResponse::new(report)))
}
