//! PostgreSQL-backed record store for mission submissions.

use async_trait::async_trait;
use playlife_core::mission::{Mission, MissionChanges, NewMission};
use playlife_core::submission::{CollaboratorError, RecordStore};
use playlife_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::MissionRepo;

/// [`RecordStore`] writing through [`MissionRepo`].
///
/// Database errors are passed on as their message; a missing update target
/// becomes a "not found" message.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert_mission(&self, mission: NewMission) -> Result<Mission, CollaboratorError> {
        MissionRepo::create(&self.pool, &mission)
            .await
            .map_err(|e| {
                tracing::warn!(created_by = mission.created_by, error = %e, "Mission insert failed");
                CollaboratorError::new(e.to_string())
            })
    }

    async fn update_mission(
        &self,
        id: DbId,
        changes: MissionChanges,
    ) -> Result<Mission, CollaboratorError> {
        MissionRepo::update(&self.pool, id, &changes)
            .await
            .map_err(|e| {
                tracing::warn!(mission_id = id, error = %e, "Mission update failed");
                CollaboratorError::new(e.to_string())
            })?
            .ok_or_else(|| {
                tracing::warn!(mission_id = id, "Mission to update no longer exists");
                CollaboratorError::new(format!("Mission {id} no longer exists"))
            })
    }
}
