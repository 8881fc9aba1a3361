//! Admin-only user management.
//!
//! Passwords are hashed here before the DTOs reach the CRUD engine, so the
//! engine and the audit trail only ever see the hash (and redact it).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use itam_core::audit::AuditActor;
use itam_core::error::CoreError;
use itam_core::pagination::Paginated;
use itam_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use itam_core::types::DbId;
use itam_db::models::user::{CreateUser, UpdateUser, User, UserFilter};
use itam_db::repositories::UserRepo;
use serde::Deserialize;

use super::crud::PageParams;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::engine::CrudService;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::origin::ClientOrigin;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

fn hash(password: &str) -> AppResult<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(CoreError::Validation)?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

/// Refuse a change that would leave the system without an active admin.
async fn ensure_admin_remains(state: &AppState, target: &User) -> AppResult<()> {
    if target.role != ROLE_ADMIN || !target.is_active {
        return Ok(());
    }
    if UserRepo::count_active_admins(&state.pool).await? <= 1 {
        return Err(CoreError::Validation("cannot remove the last active admin".into()).into());
    }
    Ok(())
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(filter): AppQuery<UserFilter>,
) -> AppResult<Json<DataResponse<Paginated<User>>>> {
    let result = CrudService::<UserRepo>::from_state(&state)
        .list(&filter, page.request())
        .await?;
    Ok(Json(DataResponse::new(result)))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = CrudService::<UserRepo>::from_state(&state).get_by_id(id).await?;
    Ok(Json(DataResponse::new(user)))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ClientOrigin(origin): ClientOrigin,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    let password_hash = hash(&input.password)?;
    let create = CreateUser {
        email: input.email,
        name: input.name,
        role: input.role.unwrap_or_else(|| ROLE_EDITOR.to_string()),
        password_hash,
    };

    let actor = AuditActor::new(admin.user_id, origin);
    let user = CrudService::<UserRepo>::from_state(&state)
        .create(&create, &actor)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(user))))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ClientOrigin(origin): ClientOrigin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<User>>> {
    let service = CrudService::<UserRepo>::from_state(&state);
    let target = service.get_by_id(id).await?;

    let changes_role = input.role.as_deref().is_some_and(|r| r != target.role);
    let changes_status = input.is_active.is_some_and(|a| a != target.is_active);

    if id == admin.user_id && (changes_role || changes_status) {
        return Err(
            CoreError::Validation("cannot change your own role or status".into()).into(),
        );
    }
    let demotes = input.role.as_deref().is_some_and(|r| r != ROLE_ADMIN);
    let deactivates = input.is_active == Some(false);
    if demotes || deactivates {
        ensure_admin_remains(&state, &target).await?;
    }

    let password_hash = input.password.as_deref().map(hash).transpose()?;
    let update = UpdateUser {
        email: input.email,
        name: input.name,
        role: input.role,
        is_active: input.is_active,
        password_hash,
    };

    let actor = AuditActor::new(admin.user_id, origin);
    let user = service.update(id, &update, &actor).await?;
    Ok(Json(DataResponse::new(user)))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ClientOrigin(origin): ClientOrigin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    if id == admin.user_id {
        return Err(CoreError::Validation("cannot delete your own account".into()).into());
    }

    let service = CrudService::<UserRepo>::from_state(&state);
    let target = service.get_by_id(id).await?;
    ensure_admin_remains(&state, &target).await?;

    let actor = AuditActor::new(admin.user_id, origin);
    service.delete(id, &actor).await?;
    Ok(Json(DataResponse::new(MessageResponse::new("User deleted"))))
}
