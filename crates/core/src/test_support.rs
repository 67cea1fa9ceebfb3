//! Shared fixtures and in-memory collaborators for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::mission::{Mission, MissionChanges, MissionDraft, MissionStatus, MissionType, NewMission};
use crate::submission::{CollaboratorError, ObjectStorage, RecordStore};
use crate::types::{Date, DbId};

pub fn sample_mission() -> Mission {
    let created = Utc.with_ymd_and_hms(2026, 1, 10, 9, 30, 0).unwrap();
    Mission {
        id: 12,
        title: "Balls for Dakar".into(),
        description: "Forty footballs for two schools".into(),
        country: "Senegal".into(),
        city: "Dakar".into(),
        start_date: Date::from_ymd_opt(2026, 3, 1).unwrap(),
        end_date: Date::from_ymd_opt(2026, 3, 15).unwrap(),
        mission_type: MissionType::Traveler,
        image_url: None,
        fundraising_url: Some("https://fundraise.example.org/dakar".into()),
        status: MissionStatus::Active,
        created_by: 4,
        created_at: created,
        updated_at: created,
    }
}

/// A draft that passes every step.
pub fn complete_draft() -> MissionDraft {
    MissionDraft {
        title: "Balls for Dakar".into(),
        description: "Forty footballs for two schools".into(),
        country: "Senegal".into(),
        city: "Dakar".into(),
        start_date: Date::from_ymd_opt(2026, 3, 1),
        end_date: Date::from_ymd_opt(2026, 3, 15),
        mission_type: Some(MissionType::Traveler),
        ..MissionDraft::default()
    }
}

// ---------------------------------------------------------------------------
// Fake object storage
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeStorage {
    fail_with: Option<String>,
    /// `(bucket, path, content_type)` of every successful upload.
    uploads: Mutex<Vec<(String, String, String)>>,
}

impl FakeStorage {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<(String, String, String)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        _bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, CollaboratorError> {
        if let Some(message) = &self.fail_with {
            return Err(CollaboratorError::new(message.clone()));
        }
        self.uploads.lock().unwrap().push((
            bucket.to_string(),
            path.to_string(),
            content_type.to_string(),
        ));
        Ok(self.public_url(bucket, path))
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://storage.test/{bucket}/{path}")
    }
}

// ---------------------------------------------------------------------------
// Fake record store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeRecords {
    fail_with: Option<String>,
    existing: Option<Mission>,
    inserts: Mutex<Vec<NewMission>>,
    updates: Mutex<Vec<(DbId, MissionChanges)>>,
}

impl FakeRecords {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_mission(mission: Mission) -> Self {
        Self {
            existing: Some(mission),
            ..Self::default()
        }
    }

    pub fn inserts(&self) -> Vec<NewMission> {
        self.inserts.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(DbId, MissionChanges)> {
        self.updates.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), CollaboratorError> {
        match &self.fail_with {
            Some(message) => Err(CollaboratorError::new(message.clone())),
            None => Ok(()),
        }
    }
}

fn materialize(id: DbId, created_by: DbId, fields: MissionChanges) -> Mission {
    let now = Utc::now();
    Mission {
        id,
        title: fields.title,
        description: fields.description,
        country: fields.country,
        city: fields.city,
        start_date: fields.start_date,
        end_date: fields.end_date,
        mission_type: fields.mission_type,
        image_url: fields.image_url,
        fundraising_url: fields.fundraising_url,
        status: fields.status,
        created_by,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl RecordStore for FakeRecords {
    async fn insert_mission(&self, mission: NewMission) -> Result<Mission, CollaboratorError> {
        self.check()?;
        let mut inserts = self.inserts.lock().unwrap();
        inserts.push(mission.clone());
        let id = 100 + inserts.len() as DbId;
        Ok(materialize(id, mission.created_by, mission.fields))
    }

    async fn update_mission(
        &self,
        id: DbId,
        changes: MissionChanges,
    ) -> Result<Mission, CollaboratorError> {
        self.check()?;
        let created_by = match &self.existing {
            Some(m) if m.id == id => m.created_by,
            _ => return Err(CollaboratorError::new(format!("mission {id} not found"))),
        };
        self.updates.lock().unwrap().push((id, changes.clone()));
        Ok(materialize(id, created_by, changes))
    }
}
