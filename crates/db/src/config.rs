use std::time::Duration;

use schoolhub_core::env::{self, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Database configuration loaded from environment variables.
///
/// `DATABASE_URL`, when set, takes precedence over the individual
/// connection parts. Pool sizing and timeouts apply either way.
#[derive(Clone)]
pub struct DbConfig {
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Upper bound on open connections (default: `10`).
    pub max_connections: u32,
    /// Require TLS when `true`; otherwise TLS is used only if offered.
    pub ssl: bool,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DbConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default      |
    /// |---------------------------|--------------|
    /// | `DATABASE_URL`            | unset        |
    /// | `DB_HOST`                 | `localhost`  |
    /// | `DB_PORT`                 | `5432`       |
    /// | `DB_USER`                 | `postgres`   |
    /// | `DB_PASSWORD`             | empty        |
    /// | `DB_NAME`                 | `schools_db` |
    /// | `DB_POOL_SIZE`            | `10`         |
    /// | `DB_SSL`                  | `false`      |
    /// | `DB_CONNECT_TIMEOUT_SECS` | `10`         |
    /// | `DB_IDLE_TIMEOUT_SECS`    | `600`        |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            database_url,
            host: env::var_or("DB_HOST", "localhost"),
            port: env::parse_var("DB_PORT", 5432)?,
            user: env::var_or("DB_USER", "postgres"),
            password: env::var_or("DB_PASSWORD", ""),
            database: env::var_or("DB_NAME", "schools_db"),
            max_connections: env::parse_var("DB_POOL_SIZE", 10)?,
            ssl: env::parse_flag("DB_SSL", false)?,
            connect_timeout: Duration::from_secs(env::parse_var("DB_CONNECT_TIMEOUT_SECS", 10)?),
            idle_timeout: Duration::from_secs(env::parse_var("DB_IDLE_TIMEOUT_SECS", 600)?),
        })
    }

    /// Build connection options from the URL or the individual parts.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = match &self.database_url {
            Some(url) => url.parse::<PgConnectOptions>()?,
            None => PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.database),
        };
        Ok(if self.ssl {
            options.ssl_mode(PgSslMode::Require)
        } else {
            options
        })
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: String::new(),
            database: "schools_db".into(),
            max_connections: 10,
            ssl: false,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

// Keep credentials out of logs.
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("ssl", &self.ssl)
            .field("connect_timeout", &self.connect_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .finish_non_exhaustive()
    }
}
