//! Mission row model.

use playlife_core::error::CoreError;
use playlife_core::mission::{Mission, MissionStatus, MissionType};
use playlife_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Raw row from the `missions` table.
#[derive(Debug, Clone, FromRow)]
pub struct MissionRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub country: String,
    pub city: String,
    pub start_date: Date,
    pub end_date: Date,
    pub mission_type: String,
    pub image_url: Option<String>,
    pub fundraising_url: Option<String>,
    pub status: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<MissionRow> for Mission {
    type Error = CoreError;

    fn try_from(row: MissionRow) -> Result<Self, Self::Error> {
        Ok(Mission {
            id: row.id,
            title: row.title,
            description: row.description,
            country: row.country,
            city: row.city,
            start_date: row.start_date,
            end_date: row.end_date,
            mission_type: MissionType::from_str_db(&row.mission_type)?,
            image_url: row.image_url,
            fundraising_url: row.fundraising_url,
            status: MissionStatus::from_str_db(&row.status)?,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Convert a fetched row, reporting bad enum values as a decode error.
pub(crate) fn decode(row: MissionRow) -> Result<Mission, sqlx::Error> {
    Mission::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

/// Per-owner dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct MissionStats {
    pub total: i64,
    pub active: i64,
}
