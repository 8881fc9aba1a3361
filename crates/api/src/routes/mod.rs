pub mod admin;
pub mod auth;
pub mod content;
pub mod entities;
pub mod health;
pub mod public;

use axum::Router;

use crate::cache::CacheHandle;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                       login (public)
/// /auth/me                          current user
///
/// /public/{resource}                cached public listings (no auth)
/// /public/{projects,clubs,blog}/{slug}
///
/// /wins                             CRUD + /years, /stats, /import
/// /projects                         CRUD + /tags
/// /team                             CRUD
/// /news                             CRUD
/// /partners                         CRUD
/// /clubs                            CRUD
/// /blog                             CRUD
/// /stats                            CRUD + /key/{key}
///
/// /users                            CRUD (admin only)
/// /admin/audit-logs                 audit trail (admin only)
/// ```
///
/// Every content resource also accepts `PUT /reorder {ids}`.
pub fn api_routes(cache: &CacheHandle) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/public", public::router(cache))
        .nest("/wins", content::wins_router())
        .nest("/projects", content::projects_router())
        .nest("/team", content::team_router())
        .nest("/news", content::news_router())
        .nest("/partners", content::partners_router())
        .nest("/clubs", content::clubs_router())
        .nest("/blog", content::blog_router())
        .nest("/stats", content::stats_router())
        .nest("/users", admin::users_router())
        .nest("/admin", admin::router())
}
