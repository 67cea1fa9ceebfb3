//! Submission adapter and the collaborator contracts it writes through.
//!
//! The adapter turns a finished draft into at most one object upload and
//! exactly one record write, in that order:
//!
//! 1. If a media file is pending, re-check it, upload it under a
//!    user-scoped path and substitute the returned public URL.
//! 2. Insert (create mode, with `created_by` from the session) or update
//!    (edit mode, editable fields only) the mission record.
//!
//! A failed upload aborts before the record write. A failed record write
//! after a successful upload leaves the uploaded object in place; no
//! compensating delete is issued.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::media::{self, MediaError, MediaFile, MISSION_MEDIA_BUCKET};
use crate::mission::{Mission, MissionChanges, MissionDraft, NewMission};
use crate::session::Session;
use crate::types::DbId;
use crate::validation::StepIncomplete;

// ---------------------------------------------------------------------------
// Collaborator contracts
// ---------------------------------------------------------------------------

/// Failure reported by an external collaborator, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CollaboratorError {
    pub message: String,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Object storage holding uploaded media.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` at `path` inside `bucket` and return its public URL.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, CollaboratorError>;

    /// Public URL of an object, whether or not it exists yet.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Record store holding missions.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_mission(&self, mission: NewMission) -> Result<Mission, CollaboratorError>;

    async fn update_mission(
        &self,
        id: DbId,
        changes: MissionChanges,
    ) -> Result<Mission, CollaboratorError>;
}

// ---------------------------------------------------------------------------
// Request / errors
// ---------------------------------------------------------------------------

/// Whether the submission creates a new mission or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SubmissionMode {
    Create,
    Update { mission_id: DbId },
}

/// Snapshot of everything needed to submit, detached from the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub mode: SubmissionMode,
    pub draft: MissionDraft,
    pub media: Option<MediaFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("You must be signed in to submit a mission")]
    NotAuthenticated,

    #[error(transparent)]
    Incomplete(#[from] StepIncomplete),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("Image upload failed: {0}")]
    Upload(CollaboratorError),

    #[error("Saving the mission failed: {0}")]
    RecordWrite(CollaboratorError),
}

impl From<SubmissionError> for CoreError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::NotAuthenticated => CoreError::Unauthorized(err.to_string()),
            SubmissionError::Incomplete(_) | SubmissionError::Media(_) => {
                CoreError::Validation(err.to_string())
            }
            SubmissionError::Upload(_) | SubmissionError::RecordWrite(_) => {
                CoreError::Internal(err.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Writes finished drafts through the storage and record collaborators.
#[derive(Clone)]
pub struct SubmissionAdapter {
    storage: Arc<dyn ObjectStorage>,
    records: Arc<dyn RecordStore>,
}

impl SubmissionAdapter {
    pub fn new(storage: Arc<dyn ObjectStorage>, records: Arc<dyn RecordStore>) -> Self {
        Self { storage, records }
    }

    /// Run one submission attempt. Never retries.
    pub async fn submit(
        &self,
        request: SubmissionRequest,
        session: &Session,
    ) -> Result<Mission, SubmissionError> {
        let user_id = session
            .user_id()
            .ok_or(SubmissionError::NotAuthenticated)?;

        let SubmissionRequest {
            mode,
            mut draft,
            media,
        } = request;

        // Fail on an incomplete draft before anything leaves the process.
        draft.to_changes()?;

        if let Some(file) = media {
            media::validate_media(&file)?;

            let path = media::upload_path(user_id, &file.file_name, chrono::Utc::now());
            let size = file.size();
            let url = self
                .storage
                .upload(MISSION_MEDIA_BUCKET, &path, file.bytes, &file.content_type)
                .await
                .map_err(|e| {
                    tracing::warn!(user_id, path = %path, error = %e, "Mission image upload failed");
                    SubmissionError::Upload(e)
                })?;

            tracing::info!(user_id, path = %path, size, "Mission image uploaded");
            draft.image_url = url;
        }

        let changes = draft.to_changes()?;

        let result = match mode {
            SubmissionMode::Create => {
                self.records
                    .insert_mission(NewMission {
                        created_by: user_id,
                        fields: changes,
                    })
                    .await
            }
            SubmissionMode::Update { mission_id } => {
                self.records.update_mission(mission_id, changes).await
            }
        };

        match result {
            Ok(mission) => {
                tracing::info!(
                    mission_id = mission.id,
                    user_id,
                    mode = ?mode,
                    "Mission submitted"
                );
                Ok(mission)
            }
            Err(e) => {
                tracing::warn!(user_id, mode = ?mode, error = %e, "Mission record write failed");
                Err(SubmissionError::RecordWrite(e))
            }
        }
    }
}
