//! Handlers for `/mission-wizards`: the mission creation and editing wizard.
//!
//! Every open wizard lives in the in-memory [`WizardRegistry`] and belongs to
//! the user that opened it. Nothing reaches object storage or the database
//! until `submit`.
//!
//! [`WizardRegistry`]: crate::wizards::WizardRegistry

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use playlife_core::error::CoreError;
use playlife_core::media::MediaFile;
use playlife_core::mission::{Mission, MissionField, MissionType};
use playlife_core::submission::SubmissionMode;
use playlife_core::types::DbId;
use playlife_core::wizard::{MissionWizard, WizardError, WizardView};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::missions::find_mission;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Content type assumed when a multipart part does not declare one.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /mission-wizards`. Omit `mission_id` to create.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OpenWizardRequest {
    pub mission_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct SelectProfileRequest {
    pub mission_type: MissionType,
}

/// Request body for `PUT /mission-wizards/{id}/fields`: field name to raw value.
///
/// The edits are applied together; if one is rejected none are kept.
#[derive(Debug, Deserialize)]
pub struct EditFieldsRequest {
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct WizardResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub view: WizardView,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/mission-wizards
///
/// Open a wizard. With `mission_id` the wizard edits that mission, which the
/// caller must own (admins may edit any mission).
pub async fn open(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<OpenWizardRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<WizardResponse>>)> {
    let wizard = match input.mission_id {
        None => MissionWizard::new(),
        Some(mission_id) => {
            let mission = find_mission(&state, mission_id).await?;
            if !auth_user.session().can_manage(mission.created_by) {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Only the mission's creator or an admin can edit it".into(),
                )));
            }
            MissionWizard::for_mission(&mission)
        }
    };

    let view = wizard.view();
    let id = state.wizards.open(auth_user.user_id, wizard).await;

    tracing::info!(
        wizard_id = %id,
        user_id = auth_user.user_id,
        mission_id = ?input.mission_id,
        "Mission wizard opened"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: WizardResponse { id, view },
        }),
    ))
}

/// GET /api/v1/mission-wizards/{id}
pub async fn get(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<WizardResponse>>> {
    let view = state
        .wizards
        .with_wizard(id, auth_user.user_id, |w| w.view())
        .await?;
    Ok(wizard_response(id, view))
}

/// POST /api/v1/mission-wizards/{id}/profile
pub async fn select_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<SelectProfileRequest>,
) -> AppResult<Json<DataResponse<WizardResponse>>> {
    let view = state
        .wizards
        .with_wizard(id, auth_user.user_id, |w| {
            w.select_profile(input.mission_type).map(|()| w.view())
        })
        .await??;
    Ok(wizard_response(id, view))
}

/// PUT /api/v1/mission-wizards/{id}/fields
pub async fn edit_fields(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<EditFieldsRequest>,
) -> AppResult<Json<DataResponse<WizardResponse>>> {
    if input.fields.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }

    let edits = input
        .fields
        .iter()
        .map(|(name, value)| Ok((name.parse::<MissionField>()?, value.as_str())))
        .collect::<Result<Vec<_>, WizardError>>()?;

    let view = state
        .wizards
        .with_wizard(id, auth_user.user_id, |w| {
            let mut staged = w.clone();
            for (field, value) in &edits {
                staged.edit_field(*field, value)?;
            }
            *w = staged;
            Ok::<_, WizardError>(w.view())
        })
        .await??;
    Ok(wizard_response(id, view))
}

/// POST /api/v1/mission-wizards/{id}/next
///
/// Rejected with 400 and the missing fields when the current step is incomplete.
pub async fn next(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<WizardResponse>>> {
    let view = state
        .wizards
        .with_wizard(id, auth_user.user_id, |w| w.next().map(|_| w.view()))
        .await??;
    Ok(wizard_response(id, view))
}

/// POST /api/v1/mission-wizards/{id}/back
pub async fn back(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<WizardResponse>>> {
    let view = state
        .wizards
        .with_wizard(id, auth_user.user_id, |w| w.back().map(|_| w.view()))
        .await??;
    Ok(wizard_response(id, view))
}

/// POST /api/v1/mission-wizards/{id}/media
///
/// Accepts a multipart form with a required `file` field. The file is held
/// in the wizard and only uploaded on submit.
pub async fn attach_media(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<WizardResponse>>> {
    let mut file: Option<MediaFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file = Some(MediaFile::new(file_name, content_type, bytes.to_vec()));
    }

    let file = file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let size = file.size();

    let view = state
        .wizards
        .with_wizard(id, auth_user.user_id, |w| {
            w.attach_media(file).map(|()| w.view())
        })
        .await??;

    tracing::debug!(wizard_id = %id, size, "Media attached to mission wizard");
    Ok(wizard_response(id, view))
}

/// DELETE /api/v1/mission-wizards/{id}/media
pub async fn clear_media(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<WizardResponse>>> {
    let view = state
        .wizards
        .with_wizard(id, auth_user.user_id, |w| w.clear_media().map(|()| w.view()))
        .await??;
    Ok(wizard_response(id, view))
}

/// POST /api/v1/mission-wizards/{id}/submit
///
/// Upload the pending image (if any), then insert or update the mission.
/// On success the wizard is closed and removed; on failure it stays on the
/// review step with the error recorded.
///
/// The collaborator calls and the bookkeeping after them run in a spawned
/// task. A caller that disconnects mid-submit does not leave the wizard
/// stuck in flight.
pub async fn submit(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<DataResponse<Mission>>)> {
    let request = state
        .wizards
        .with_wizard(id, auth_user.user_id, |w| w.begin_submit())
        .await??;
    let status = match request.mode {
        SubmissionMode::Create => StatusCode::CREATED,
        SubmissionMode::Update { .. } => StatusCode::OK,
    };

    let user_id = auth_user.user_id;
    let session = auth_user.session();
    let wizards = Arc::clone(&state.wizards);
    let submissions = Arc::clone(&state.submissions);

    let outcome = tokio::spawn(async move {
        // The registry lock is released while the collaborators run.
        let result = submissions.submit(request, &session).await;
        let mission = wizards
            .with_wizard(id, user_id, |w| w.finish_submit(result))
            .await??;
        wizards.remove(id, user_id).await?;
        Ok::<_, AppError>(mission)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Submission task failed: {e}")))?;

    let mission = outcome.inspect_err(|e| {
        tracing::warn!(wizard_id = %id, user_id, error = %e, "Mission submission failed");
    })?;

    tracing::info!(
        wizard_id = %id,
        mission_id = mission.id,
        user_id,
        "Mission wizard submitted"
    );
    Ok((status, Json(DataResponse { data: mission })))
}

/// DELETE /api/v1/mission-wizards/{id}
///
/// Close the wizard without saving anything.
pub async fn close(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let submitting = state
        .wizards
        .with_wizard(id, auth_user.user_id, |w| w.is_submitting())
        .await?;
    if submitting {
        return Err(WizardError::SubmitInFlight.into());
    }

    state.wizards.remove(id, auth_user.user_id).await?;
    tracing::info!(wizard_id = %id, user_id = auth_user.user_id, "Mission wizard closed");
    Ok(StatusCode::NO_CONTENT)
}

fn wizard_response(id: Uuid, view: WizardView) -> Json<DataResponse<WizardResponse>> {
    Json(DataResponse {
        data: WizardResponse { id, view },
    })
}
