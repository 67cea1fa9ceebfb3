//! Route definitions for `/admin`. Every handler requires the admin role.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /structures/pending           -> list_pending_structures
/// POST /structures/{id}/moderate     -> moderate_structure
/// GET  /missions                     -> list_missions_admin
/// PUT  /missions/{id}/fundraising    -> set_fundraising
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/structures/pending", get(admin::list_pending_structures))
        .route("/structures/{id}/moderate", post(admin::moderate_structure))
        .route("/missions", get(admin::list_missions_admin))
        .route("/missions/{id}/fundraising", put(admin::set_fundraising))
}
