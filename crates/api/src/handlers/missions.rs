//! Handlers for `/missions`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use playlife_core::error::CoreError;
use playlife_core::mission::{Mission, MissionStatus};
use playlife_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use playlife_core::types::DbId;
use playlife_db::models::mission::MissionStats;
use playlife_db::repositories::MissionRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for mission listings.
#[derive(Debug, Default, Deserialize)]
pub struct MissionListParams {
    pub status: Option<MissionStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/missions
///
/// Public listing, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<MissionListParams>,
) -> AppResult<Json<DataResponse<Vec<Mission>>>> {
    let missions = list_missions(&state, &params).await?;
    Ok(Json(DataResponse { data: missions }))
}

/// GET /api/v1/missions/mine
pub async fn list_mine(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Mission>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let missions = MissionRepo::list_by_owner(&state.pool, auth_user.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: missions }))
}

/// GET /api/v1/missions/mine/stats
///
/// Dashboard counters for the caller.
pub async fn my_stats(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<MissionStats>>> {
    let stats = MissionRepo::stats_for_owner(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/missions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Mission>>> {
    let mission = find_mission(&state, id).await?;
    Ok(Json(DataResponse { data: mission }))
}

/// DELETE /api/v1/missions/{id}
///
/// Owner or admin only.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mission = find_mission(&state, id).await?;
    if !auth_user.session().can_manage(mission.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the mission's creator or an admin can delete it".into(),
        )));
    }

    if !MissionRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Mission",
            id,
        }));
    }
    tracing::info!(mission_id = id, user_id = auth_user.user_id, "Mission deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shared with the admin and wizard handlers
// ---------------------------------------------------------------------------

pub(crate) async fn list_missions(
    state: &AppState,
    params: &MissionListParams,
) -> AppResult<Vec<Mission>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    Ok(MissionRepo::list(&state.pool, params.status, limit, offset).await?)
}

pub(crate) async fn find_mission(state: &AppState, id: DbId) -> AppResult<Mission> {
    MissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Mission",
            id,
        }))
}
