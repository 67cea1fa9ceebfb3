//! Repository for the `structures` table.

use playlife_core::structure::{Structure, StructureStatus};
use playlife_core::types::DbId;
use sqlx::PgPool;

use crate::models::structure::{decode, CreateStructure, StructureRow};

const COLUMNS: &str = "id, name, description, structure_type, address, city, country, \
                        contact_email, contact_phone, website_url, image_url, status, \
                        submitted_by, moderated_by, moderated_at, created_at, updated_at";

pub struct StructureRepo;

impl StructureRepo {
    /// Insert a submitted structure. It always starts as `pending`.
    pub async fn create(
        pool: &PgPool,
        submitted_by: DbId,
        input: &CreateStructure,
    ) -> Result<Structure, sqlx::Error> {
        let query = format!(
            "INSERT INTO structures (name, description, structure_type, address, city, country,
                                     contact_email, contact_phone, website_url, image_url,
                                     status, submitted_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, StructureRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.structure_type)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.country)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(&input.website_url)
            .bind(&input.image_url)
            .bind(StructureStatus::Pending.as_str())
            .bind(submitted_by)
            .fetch_one(pool)
            .await?;
        decode(row)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Structure>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM structures WHERE id = $1");
        sqlx::query_as::<_, StructureRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// Approved structures by name, optionally restricted to one country
    /// (case-insensitive).
    pub async fn list_approved(
        pool: &PgPool,
        country: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Structure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM structures
             WHERE status = 'approved'
               AND ($1::TEXT IS NULL OR LOWER(country) = LOWER($1))
             ORDER BY name ASC, id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, StructureRow>(&query)
            .bind(country)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Pending structures, oldest submission first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Structure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM structures
             WHERE status = 'pending'
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, StructureRow>(&query)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Record a moderation verdict on a still-pending structure.
    ///
    /// Returns `None` if the structure is missing or no longer pending, so
    /// two concurrent moderators cannot both win.
    pub async fn moderate(
        pool: &PgPool,
        id: DbId,
        status: StructureStatus,
        moderated_by: DbId,
    ) -> Result<Option<Structure>, sqlx::Error> {
        let query = format!(
            "UPDATE structures SET
                status = $2,
                moderated_by = $3,
                moderated_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StructureRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(moderated_by)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }
}
