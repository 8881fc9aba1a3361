//! Per-entity admin routers: the shared CRUD set plus each entity's extras.

use axum::routing::{get, post};
use axum::Router;
use itam_db::repositories::{
    BlogRepo, ClubRepo, MemberRepo, NewsRepo, PartnerRepo, ProjectRepo, StatRepo, WinRepo,
};

use super::entities;
use crate::handlers::{projects, stats, wins};
use crate::state::AppState;

/// ```text
/// GET    /years      -> distinct years, newest first
/// GET    /stats      -> totals and current-year prize
/// POST   /import     -> multipart CSV import (field `file`)
/// ```
pub fn wins_router() -> Router<AppState> {
    Router::new()
        .route("/years", get(wins::years))
        .route("/stats", get(wins::stats))
        .route("/import", post(wins::import))
        .merge(entities::router::<WinRepo>())
}

/// ```text
/// GET    /tags       -> tag catalogue
/// ```
pub fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(projects::list_tags))
        .merge(entities::router::<ProjectRepo>())
}

pub fn team_router() -> Router<AppState> {
    entities::router::<MemberRepo>()
}

pub fn news_router() -> Router<AppState> {
    entities::router::<NewsRepo>()
}

pub fn partners_router() -> Router<AppState> {
    entities::router::<PartnerRepo>()
}

pub fn clubs_router() -> Router<AppState> {
    entities::router::<ClubRepo>()
}

pub fn blog_router() -> Router<AppState> {
    entities::router::<BlogRepo>()
}

/// ```text
/// GET    /key/{key}  -> get_by_key
/// PUT    /key/{key}  -> update_by_key
/// ```
pub fn stats_router() -> Router<AppState> {
    Router::new()
        .route(
            "/key/{key}",
            get(stats::get_by_key).put(stats::update_by_key),
        )
        .merge(entities::router::<StatRepo>())
}
