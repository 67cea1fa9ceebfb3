//! Route definitions for the `/missions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::missions;
use crate::state::AppState;

/// Routes mounted at `/missions`.
///
/// ```text
/// GET    /            -> list
/// GET    /mine        -> list_mine
/// GET    /mine/stats  -> my_stats
/// GET    /{id}        -> get_by_id
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(missions::list))
        .route("/mine", get(missions::list_mine))
        .route("/mine/stats", get(missions::my_stats))
        .route("/{id}", get(missions::get_by_id).delete(missions::delete))
}
