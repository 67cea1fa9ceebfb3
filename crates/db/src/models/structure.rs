//! Partner structure row model and DTOs.

use playlife_core::error::CoreError;
use playlife_core::structure::{Structure, StructureStatus};
use playlife_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// Raw row from the `structures` table.
#[derive(Debug, Clone, FromRow)]
pub struct StructureRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub structure_type: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website_url: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub submitted_by: Option<DbId>,
    pub moderated_by: Option<DbId>,
    pub moderated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<StructureRow> for Structure {
    type Error = CoreError;

    fn try_from(row: StructureRow) -> Result<Self, Self::Error> {
        Ok(Structure {
            id: row.id,
            name: row.name,
            description: row.description,
            structure_type: row.structure_type,
            address: row.address,
            city: row.city,
            country: row.country,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            website_url: row.website_url,
            image_url: row.image_url,
            status: StructureStatus::from_str_db(&row.status)?,
            submitted_by: row.submitted_by,
            moderated_by: row.moderated_by,
            moderated_at: row.moderated_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(crate) fn decode(row: StructureRow) -> Result<Structure, sqlx::Error> {
    Structure::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

/// DTO for submitting a structure. New structures always start `pending`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStructure {
    pub name: String,
    pub description: Option<String>,
    pub structure_type: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website_url: Option<String>,
    pub image_url: Option<String>,
}
