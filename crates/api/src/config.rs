use std::path::PathBuf;

use schoolhub_core::env::{self, ConfigError};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for the database pool to close (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Root of publicly served files; images live in `<public_dir>/schoolImages`.
    pub public_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `PUBLIC_DIR`           | `public`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var_or("HOST", "0.0.0.0"),
            port: env::parse_var("PORT", 3000)?,
            cors_origins: parse_origins(&env::var_or("CORS_ORIGINS", "http://localhost:3000")),
            request_timeout_secs: env::parse_var("REQUEST_TIMEOUT_SECS", 30)?,
            shutdown_timeout_secs: env::parse_var("SHUTDOWN_TIMEOUT_SECS", 30)?,
            public_dir: PathBuf::from(env::var_or("PUBLIC_DIR", "public")),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
