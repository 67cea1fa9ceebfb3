//! Handlers for `/structures`: partner structure submissions and the public
//! directory.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use playlife_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use playlife_core::structure::Structure;
use playlife_db::models::structure::CreateStructure;
use playlife_db::repositories::StructureRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /structures`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStructureRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub structure_type: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[validate(url)]
    pub website_url: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

impl From<CreateStructureRequest> for CreateStructure {
    fn from(req: CreateStructureRequest) -> Self {
        // Blank optional text is stored as NULL.
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        CreateStructure {
            name: req.name.trim().to_string(),
            description: clean(req.description),
            structure_type: clean(req.structure_type),
            address: clean(req.address),
            city: clean(req.city),
            country: clean(req.country),
            contact_email: clean(req.contact_email),
            contact_phone: clean(req.contact_phone),
            website_url: clean(req.website_url),
            image_url: clean(req.image_url),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StructureListParams {
    pub country: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/structures
///
/// Submit a structure for moderation. It is not listed until approved.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateStructureRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Structure>>)> {
    let structure =
        StructureRepo::create(&state.pool, auth_user.user_id, &CreateStructure::from(input))
            .await?;

    tracing::info!(
        structure_id = structure.id,
        user_id = auth_user.user_id,
        "Structure submitted for moderation"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: structure })))
}

/// GET /api/v1/structures
///
/// Public directory of approved structures, by name.
pub async fn list_approved(
    State(state): State<AppState>,
    Query(params): Query<StructureListParams>,
) -> AppResult<Json<DataResponse<Vec<Structure>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let country = params
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let structures = StructureRepo::list_approved(&state.pool, country, limit, offset).await?;
    Ok(Json(DataResponse { data: structures }))
}
