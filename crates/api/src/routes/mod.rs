pub mod admin;
pub mod auth;
pub mod health;
pub mod mission_wizard;
pub mod missions;
pub mod structures;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                           register (public)
/// /auth/login                              login (public)
/// /auth/refresh                            refresh (public)
/// /auth/logout                             logout (requires auth)
///
/// /me                                      get, update own profile
///
/// /missions                                list (public, ?status, limit, offset)
/// /missions/mine                           caller's missions
/// /missions/mine/stats                     caller's dashboard counters
/// /missions/{id}                           get (public), delete (owner or admin)
///
/// /mission-wizards                         open (create, or edit with mission_id)
/// /mission-wizards/{id}                    get, close
/// /mission-wizards/{id}/profile            select profile (step 1)
/// /mission-wizards/{id}/fields             edit fields (PUT)
/// /mission-wizards/{id}/next               next step
/// /mission-wizards/{id}/back               previous step
/// /mission-wizards/{id}/media              attach (multipart), clear (DELETE)
/// /mission-wizards/{id}/submit             upload image and save mission
///                                          (see `untimed_api_routes`)
///
/// /structures                              list approved (public), submit
///
/// /admin/structures/pending                pending structures (admin only)
/// /admin/structures/{id}/moderate          approve or reject (POST)
/// /admin/missions                          all missions
/// /admin/missions/{id}/fundraising         set fundraising link (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route(
            "/me",
            get(handlers::auth::me).put(handlers::auth::update_me),
        )
        .nest("/missions", missions::router())
        .nest("/mission-wizards", mission_wizard::router())
        .nest("/structures", structures::router())
        .nest("/admin", admin::router())
}

/// Routes under `/api/v1` that run without the request timeout.
///
/// A submission waits on object storage and the database and must not be
/// cut off halfway.
pub fn untimed_api_routes() -> Router<AppState> {
    Router::new().nest("/mission-wizards", mission_wizard::submit_router())
}
