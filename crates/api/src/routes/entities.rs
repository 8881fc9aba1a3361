//! Admin routes shared by every content entity.

use axum::routing::{get, put};
use axum::Router;
use itam_db::entity::Entity;
use serde::de::DeserializeOwned;

use crate::handlers::crud;
use crate::state::AppState;

/// Standard resource routes for one entity.
///
/// ```text
/// GET    /           -> list (filtered, paginated)
/// POST   /           -> create
/// PUT    /reorder    -> reorder
/// GET    /{id}       -> get_by_id
/// PUT    /{id}       -> update
/// DELETE /{id}       -> delete
/// ```
pub fn router<E>() -> Router<AppState>
where
    E: Entity,
    E::Create: DeserializeOwned,
    E::Update: DeserializeOwned,
    E::Filter: DeserializeOwned,
{
    Router::new()
        .route("/", get(crud::list::<E>).post(crud::create::<E>))
        .route("/reorder", put(crud::reorder::<E>))
        .route(
            "/{id}",
            get(crud::get_by_id::<E>)
                .put(crud::update::<E>)
                .delete(crud::delete::<E>),
        )
}
