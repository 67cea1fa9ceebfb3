//! Repository for the `missions` table.

use playlife_core::mission::{Mission, MissionChanges, MissionStatus, NewMission};
use playlife_core::types::DbId;
use sqlx::PgPool;

use crate::models::mission::{decode, MissionRow, MissionStats};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, country, city, start_date, end_date, \
                        mission_type, image_url, fundraising_url, status, created_by, \
                        created_at, updated_at";

/// Provides CRUD operations for missions.
pub struct MissionRepo;

impl MissionRepo {
    /// Insert a mission in a single statement, returning the created record.
    pub async fn create(pool: &PgPool, input: &NewMission) -> Result<Mission, sqlx::Error> {
        let query = format!(
            "INSERT INTO missions (title, description, country, city, start_date, end_date,
                                   mission_type, image_url, fundraising_url, status, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let f = &input.fields;
        let row = sqlx::query_as::<_, MissionRow>(&query)
            .bind(&f.title)
            .bind(&f.description)
            .bind(&f.country)
            .bind(&f.city)
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(f.mission_type.as_str())
            .bind(&f.image_url)
            .bind(&f.fundraising_url)
            .bind(f.status.as_str())
            .bind(input.created_by)
            .fetch_one(pool)
            .await?;
        decode(row)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions WHERE id = $1");
        sqlx::query_as::<_, MissionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// List missions newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<MissionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Mission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM missions
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MissionRow>(&query)
            .bind(status.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// List one user's missions newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Mission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM missions
             WHERE created_by = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MissionRow>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Total and active mission counts for one owner.
    pub async fn stats_for_owner(pool: &PgPool, owner_id: DbId) -> Result<MissionStats, sqlx::Error> {
        sqlx::query_as::<_, MissionStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'active') AS active
             FROM missions
             WHERE created_by = $1",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await
    }

    /// Overwrite every editable field in a single statement.
    ///
    /// `created_by` and `created_at` are never touched. Returns `None` if no
    /// row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &MissionChanges,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!(
            "UPDATE missions SET
                title = $2,
                description = $3,
                country = $4,
                city = $5,
                start_date = $6,
                end_date = $7,
                mission_type = $8,
                image_url = $9,
                fundraising_url = $10,
                status = $11
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MissionRow>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(&changes.country)
            .bind(&changes.city)
            .bind(changes.start_date)
            .bind(changes.end_date)
            .bind(changes.mission_type.as_str())
            .bind(&changes.image_url)
            .bind(&changes.fundraising_url)
            .bind(changes.status.as_str())
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// Set or clear the fundraising link. Returns `None` if the mission is missing.
    pub async fn set_fundraising_url(
        pool: &PgPool,
        id: DbId,
        url: Option<&str>,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!(
            "UPDATE missions SET fundraising_url = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MissionRow>(&query)
            .bind(id)
            .bind(url)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// Delete a mission. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM missions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
