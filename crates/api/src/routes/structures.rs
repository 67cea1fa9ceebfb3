//! Route definitions for the `/structures` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::structures;
use crate::state::AppState;

/// Routes mounted at `/structures`.
///
/// ```text
/// GET  /  -> list_approved (public)
/// POST /  -> create (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(structures::list_approved).post(structures::create),
    )
}
