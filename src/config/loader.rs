//! Build [`ServerConfig`] from environment variables.

use super::types::{DatabaseConfig, ServerConfig, StoreBackend};
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

impl ServerConfig {
    /// Read from the process environment. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`, so callers can supply variables from any source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let db = DatabaseConfig::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database = DatabaseConfig {
            url: get("DATABASE_URL"),
            host: get("POSTGRES_HOST").unwrap_or(db.host),
            port: parse_or(get("POSTGRES_PORT"), "POSTGRES_PORT", db.port)?,
            database: get("POSTGRES_DB").unwrap_or(db.database),
            user: get("POSTGRES_USER").unwrap_or(db.user),
            password: lookup("POSTGRES_PASSWORD").unwrap_or(db.password),
            max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", db.max_connections)?,
            acquire_timeout: millis_or(get("DB_ACQUIRE_TIMEOUT_MS"), "DB_ACQUIRE_TIMEOUT_MS", db.acquire_timeout)?,
            idle_timeout: millis_or(get("DB_IDLE_TIMEOUT_MS"), "DB_IDLE_TIMEOUT_MS", db.idle_timeout)?,
            ensure_database: parse_bool_or(get("ENSURE_DATABASE"), "ENSURE_DATABASE", db.ensure_database)?,
        };

        let backend = match get("STORE_BACKEND") {
            Some(v) => StoreBackend::from_str(&v)?,
            None => defaults.backend,
        };

        Ok(ServerConfig {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(get("PORT"), "PORT", defaults.port)?,
            backend,
            database,
            body_limit: parse_or(get("REQUEST_BODY_LIMIT"), "REQUEST_BODY_LIMIT", defaults.body_limit)?,
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn millis_or(raw: Option<String>, key: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn parse_bool_or(raw: Option<String>, key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match raw.as_deref().map(str::to_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            key,
            value: raw.unwrap_or_default(),
        }),
    }
}
