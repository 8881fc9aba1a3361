//! Unauthenticated routes for the public site.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, MethodRouter};
use axum::Router;
use itam_core::cache::keys;
use itam_db::repositories::{
    BlogRepo, ClubRepo, MemberRepo, NewsRepo, PartnerRepo, ProjectRepo, WinRepo,
};

use crate::cache::CacheHandle;
use crate::handlers::public;
use crate::middleware::cache::{read_through, CachedRoute};
use crate::state::AppState;

/// Wrap a GET route in the read-through cache under `key`.
fn cached(route: MethodRouter<AppState>, cache: &CacheHandle, key: &'static str) -> MethodRouter<AppState> {
    route.layer(from_fn_with_state(CachedRoute::new(cache.clone(), key), read_through))
}

/// Public routes mounted at `/public`.
///
/// ```text
/// GET /wins              (cached)
/// GET /projects          (cached)
/// GET /projects/{slug}
/// GET /team              (cached)
/// GET /news              (cached)
/// GET /partners          (cached)
/// GET /clubs             (cached)
/// GET /clubs/{slug}
/// GET /blog              (cached)
/// GET /blog/{slug}
/// GET /stats             (cached, key -> value map)
/// ```
pub fn router(cache: &CacheHandle) -> Router<AppState> {
    Router::new()
        .route("/wins", cached(get(public::list::<WinRepo>), cache, keys::PUBLIC_WINS))
        .route(
            "/projects",
            cached(get(public::list::<ProjectRepo>), cache, keys::PUBLIC_PROJECTS),
        )
        .route("/projects/{slug}", get(public::get_by_slug::<ProjectRepo>))
        .route("/team", cached(get(public::list::<MemberRepo>), cache, keys::PUBLIC_TEAM))
        .route("/news", cached(get(public::list::<NewsRepo>), cache, keys::PUBLIC_NEWS))
        .route(
            "/partners",
            cached(get(public::list::<PartnerRepo>), cache, keys::PUBLIC_PARTNERS),
        )
        .route("/clubs", cached(get(public::list::<ClubRepo>), cache, keys::PUBLIC_CLUBS))
        .route("/clubs/{slug}", get(public::get_by_slug::<ClubRepo>))
        .route("/blog", cached(get(public::list::<BlogRepo>), cache, keys::PUBLIC_BLOG))
        .route("/blog/{slug}", get(public::get_by_slug::<BlogRepo>))
        .route("/stats", cached(get(public::stats), cache, keys::PUBLIC_STATS))
}
