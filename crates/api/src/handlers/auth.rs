//! Login and current-user endpoints.

use axum::extract::State;
use axum::Json;
use itam_core::error::CoreError;
use itam_db::models::user::User;
use itam_db::repositories::{CrudRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(CoreError::Validation("email and password are required".into()).into());
    }

    let credentials = UserRepo::find_credentials_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let valid = verify_password(&input.password, &credentials.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::warn!(user_id = credentials.id, "Failed login attempt");
        return Err(invalid_credentials());
    }
    if !credentials.is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }

    let access_token = generate_access_token(credentials.id, &credentials.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    let user = CrudRepo::find_by_id::<UserRepo>(&state.pool, credentials.id)
        .await?
        .ok_or_else(invalid_credentials)?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(DataResponse::new(LoginResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user,
    })))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let user = CrudRepo::find_by_id::<UserRepo>(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;
    Ok(Json(DataResponse::new(user)))
}
