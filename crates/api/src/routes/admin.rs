//! Admin-only routes: user management and the audit trail.

use axum::routing::get;
use axum::Router;

use crate::handlers::{audit, users};
use crate::state::AppState;

/// User management mounted at `/users`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{id}",
            get(users::get_by_id).put(users::update).delete(users::delete),
        )
}

/// Mounted at `/admin`.
///
/// ```text
/// GET    /audit-logs  -> filtered, paginated audit entries
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/audit-logs", get(audit::list))
}
