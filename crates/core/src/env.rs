//! Environment variable helpers shared by the server and database configs.

use std::str::FromStr;

/// A configuration value was present but could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{key} must be a valid {expected}, got '{value}'")]
pub struct ConfigError {
    pub key: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Read `key` as a string, falling back to `default` when unset.
pub fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read `key` and parse it, falling back to `default` when unset or empty.
pub fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    parse_value(key, std::env::var(key).ok(), default)
}

/// Read `key` as a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`).
pub fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    flag_value(key, std::env::var(key).ok(), default)
}

/// Parse an already-fetched raw value. Blank values count as unset.
pub fn parse_value<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError {
            key,
            expected: std::any::type_name::<T>(),
            value: value.to_string(),
        }),
    }
}

/// Parse an already-fetched boolean flag. Blank values count as unset.
pub fn flag_value(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = raw.map(|v| v.trim().to_ascii_lowercase()) else {
        return Ok(default);
    };
    match value.as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            key,
            expected: "boolean",
            value,
        }),
    }
}
