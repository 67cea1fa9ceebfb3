//! Admin-only handlers: structure moderation and mission oversight.

use axum::extract::{Path, Query, State};
use axum::Json;
use playlife_core::error::CoreError;
use playlife_core::mission::Mission;
use playlife_core::structure::{self, ModerationDecision, Structure};
use playlife_core::types::DbId;
use playlife_db::repositories::{MissionRepo, StructureRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::missions::{list_missions, MissionListParams};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    pub decision: ModerationDecision,
}

/// Request body for `PUT /admin/missions/{id}/fundraising`. `null` clears the link.
#[derive(Debug, Deserialize, Validate)]
pub struct FundraisingRequest {
    #[validate(url)]
    pub fundraising_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Structures
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/structures/pending
pub async fn list_pending_structures(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Structure>>>> {
    let structures = StructureRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: structures }))
}

/// POST /api/v1/admin/structures/{id}/moderate
///
/// Approve or reject a pending structure. A structure that already has a
/// verdict yields 409.
pub async fn moderate_structure(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ModerateRequest>,
) -> AppResult<Json<DataResponse<Structure>>> {
    let current = StructureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Structure",
            id,
        })?;
    let status = structure::moderate(current.status, input.decision)?;

    // A concurrent moderator may have decided between the read and the write.
    let moderated = StructureRepo::moderate(&state.pool, id, status, admin.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Structure has already been moderated".into(),
            ))
        })?;

    tracing::info!(
        structure_id = id,
        admin_id = admin.user_id,
        status = status.as_str(),
        "Structure moderated"
    );
    Ok(Json(DataResponse { data: moderated }))
}

// ---------------------------------------------------------------------------
// Missions
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/missions
pub async fn list_missions_admin(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<MissionListParams>,
) -> AppResult<Json<DataResponse<Vec<Mission>>>> {
    let missions = list_missions(&state, &params).await?;
    Ok(Json(DataResponse { data: missions }))
}

/// PUT /api/v1/admin/missions/{id}/fundraising
pub async fn set_fundraising(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<FundraisingRequest>,
) -> AppResult<Json<DataResponse<Mission>>> {
    let url = input
        .fundraising_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());

    let mission = MissionRepo::set_fundraising_url(&state.pool, id, url)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Mission",
            id,
        })?;

    tracing::info!(mission_id = id, admin_id = admin.user_id, "Fundraising link updated");
    Ok(Json(DataResponse { data: mission }))
}
