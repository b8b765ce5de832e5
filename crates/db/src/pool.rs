//! Lazily built, explicitly owned connection pool.
//!
//! [`PoolManager`] is constructed once at startup and shared through the
//! application state. The underlying [`DbPool`] is created on the first
//! [`PoolManager::acquire`] and reused until [`PoolManager::close`], after
//! which the next acquire builds a fresh pool from the same options.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::sync::Mutex;

use crate::config::DbConfig;
use crate::schema::ensure_schema;
use crate::DbPool;

#[derive(Default)]
struct Slot {
    pool: Option<DbPool>,
    schema_ready: bool,
    /// Bumped on every close so a bootstrap started against an old pool
    /// cannot mark its replacement ready.
    generation: u64,
}

/// Owner of the process-wide database pool.
pub struct PoolManager {
    connect: PgConnectOptions,
    options: PgPoolOptions,
    slot: Mutex<Slot>,
}

impl PoolManager {
    /// Prepare a manager from configuration. No connection is opened.
    pub fn new(config: &DbConfig) -> Result<Self, sqlx::Error> {
        let options = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);

        Ok(Self {
            connect: config.connect_options()?,
            options,
            slot: Mutex::new(Slot::default()),
        })
    }

    /// Adopt an already-built pool. Its options are kept so the pool can be
    /// rebuilt after [`close`](Self::close).
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            connect: (*pool.connect_options()).clone(),
            options: pool.options().clone(),
            slot: Mutex::new(Slot {
                pool: Some(pool),
                ..Slot::default()
            }),
        }
    }

    /// Return the shared pool, creating it on first use.
    ///
    /// Creation is lazy: connections are opened on demand by the queries
    /// that use them, so connectivity problems surface there.
    pub async fn acquire(&self) -> DbPool {
        let mut slot = self.slot.lock().await;
        self.acquire_locked(&mut slot)
    }

    /// Return the shared pool after making sure the schema exists.
    ///
    /// The bootstrap runs until it first succeeds for a pool; a failed
    /// bootstrap is retried on the next call. The lock is not held while the
    /// statement runs.
    pub async fn ready(&self) -> Result<DbPool, sqlx::Error> {
        let (pool, generation) = {
            let mut slot = self.slot.lock().await;
            let pool = self.acquire_locked(&mut slot);
            if slot.schema_ready {
                return Ok(pool);
            }
            (pool, slot.generation)
        };

        ensure_schema(&pool).await?;

        let mut slot = self.slot.lock().await;
        if slot.generation == generation {
            slot.schema_ready = true;
        }
        Ok(pool)
    }

    /// Check connectivity with a trivial query. Never fails; the outcome is
    /// logged and returned.
    pub async fn test(&self) -> bool {
        let pool = self.acquire().await;
        match sqlx::query_scalar::<_, chrono::DateTime<chrono::Utc>>("SELECT NOW()")
            .fetch_one(&pool)
            .await
        {
            Ok(now) => {
                tracing::info!(%now, "Database connection ok");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Database connection failed");
                false
            }
        }
    }

    /// Close every connection and forget the pool.
    pub async fn close(&self) {
        let pool = {
            let mut slot = self.slot.lock().await;
            slot.schema_ready = false;
            slot.generation += 1;
            slot.pool.take()
        };
        if let Some(pool) = pool {
            pool.close().await;
            tracing::info!("Database connection pool closed");
        }
    }

    /// Whether a pool is currently held.
    pub async fn is_initialized(&self) -> bool {
        self.slot.lock().await.pool.is_some()
    }

    fn acquire_locked(&self, slot: &mut Slot) -> DbPool {
        if let Some(pool) = &slot.pool {
            return pool.clone();
        }
        let pool = self.options.clone().connect_lazy_with(self.connect.clone());
        tracing::info!(
            max_connections = self.options.get_max_connections(),
            "Database connection pool created"
        );
        slot.pool = Some(pool.clone());
        pool
    }
}
