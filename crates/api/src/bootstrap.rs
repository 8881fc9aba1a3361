//! Startup tasks that run once before the server accepts connections.

use itam_core::audit::AuditActor;
use itam_core::roles::ROLE_ADMIN;
use itam_db::models::user::CreateUser;
use itam_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::config::AdminSeed;
use crate::engine::CrudService;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Create the bootstrap admin unless a user with that email already exists.
///
/// Returns whether an account was created. The entry is audited as a system
/// action.
pub async fn seed_admin(state: &AppState, seed: &AdminSeed) -> AppResult<bool> {
    if UserRepo::find_by_email(&state.pool, &seed.email).await?.is_some() {
        tracing::debug!(email = %seed.email, "Admin account already present");
        return Ok(false);
    }

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let input = CreateUser {
        email: seed.email.clone(),
        name: seed.name.clone(),
        role: ROLE_ADMIN.to_string(),
        password_hash,
    };

    let user = CrudService::<UserRepo>::from_state(state)
        .create(&input, &AuditActor::system())
        .await?;
    tracing::info!(user_id = user.id, email = %user.email, "Admin account created");
    Ok(true)
}
