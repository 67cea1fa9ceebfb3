//! Route definitions for `/mission-wizards`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::mission_wizard as wizard;
use crate::state::AppState;

/// Routes mounted at `/mission-wizards`.
///
/// ```text
/// POST   /                -> open
/// GET    /{id}            -> get
/// DELETE /{id}            -> close
/// POST   /{id}/profile    -> select_profile
/// PUT    /{id}/fields     -> edit_fields
/// POST   /{id}/next       -> next
/// POST   /{id}/back       -> back
/// POST   /{id}/media      -> attach_media (multipart)
/// DELETE /{id}/media      -> clear_media
/// ```
///
/// `submit` lives in [`submit_router`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(wizard::open))
        .route("/{id}", get(wizard::get).delete(wizard::close))
        .route("/{id}/profile", post(wizard::select_profile))
        .route("/{id}/fields", put(wizard::edit_fields))
        .route("/{id}/next", post(wizard::next))
        .route("/{id}/back", post(wizard::back))
        .route(
            "/{id}/media",
            post(wizard::attach_media).delete(wizard::clear_media),
        )
}

/// The submit route, mounted outside the request timeout.
///
/// ```text
/// POST   /{id}/submit     -> submit
/// ```
pub fn submit_router() -> Router<AppState> {
    Router::new().route("/{id}/submit", post(wizard::submit))
}
