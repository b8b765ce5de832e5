//! Schema bootstrap for the `schools` table.

use crate::DbPool;

/// Idempotent DDL for the `schools` table. Column names and types are part
/// of the external contract.
pub const CREATE_SCHOOLS_TABLE_SQL: &str = "\
CREATE TABLE IF NOT EXISTS schools (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    address TEXT NOT NULL,
    city VARCHAR(100) NOT NULL,
    state VARCHAR(100) NOT NULL,
    contact BIGINT NOT NULL,
    image VARCHAR(255),
    email_id VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

/// Advisory lock key taken while the DDL runs. Concurrent
/// `CREATE TABLE IF NOT EXISTS` statements can otherwise collide on the
/// catalog's unique indexes.
const SCHEMA_LOCK_KEY: i64 = 0x5C40_0115;

/// Create the `schools` table if it does not exist yet.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    match create_table(pool).await {
        Ok(_) => {
            tracing::info!("schools table ensured");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to ensure schools table");
            Err(e)
        }
    }
}

async fn create_table(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    sqlx::query(CREATE_SCHOOLS_TABLE_SQL)
        .execute(&mut *tx)
        .await?;
    tx.commit().await
}
