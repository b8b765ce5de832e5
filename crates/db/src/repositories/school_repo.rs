//! Repository for the `schools` table.
//!
//! Records are append-only: there is no update or delete.

use schoolhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::school::{CreateSchool, School};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, city, state, contact, image, email_id, created_at";

/// Provides insert and listing operations for schools.
pub struct SchoolRepo;

impl SchoolRepo {
    /// Insert a new school, returning its generated ID.
    pub async fn create(pool: &PgPool, input: &CreateSchool) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO schools (name, address, city, state, contact, image, email_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(input.contact)
        .bind(&input.image)
        .bind(&input.email_id)
        .fetch_one(pool)
        .await
    }

    /// List every school, newest first. IDs break ties between rows created
    /// in the same instant.
    pub async fn list(pool: &PgPool) -> Result<Vec<School>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schools ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, School>(&query).fetch_all(pool).await
    }

    /// Total number of schools.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM schools")
            .fetch_one(pool)
            .await
    }
}
