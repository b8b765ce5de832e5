//! Persistence layer for the `schools` table.
//!
//! Owns database configuration, the lazily built connection pool, the
//! schema bootstrap statement, row models and the repository.

pub mod config;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

pub use config::DbConfig;
pub use pool::PoolManager;
pub use schema::ensure_schema;

pub type DbPool = sqlx::PgPool;
