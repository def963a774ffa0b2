//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `CATALOG_DB_MAX_CONNECTIONS` - Pool size ceiling (default: 10)
//! - `CATALOG_DB_MIN_CONNECTIONS` - Idle connections kept open (default: 1)
//! - `CATALOG_DB_ACQUIRE_TIMEOUT_SECS` - Wait for a free connection (default: 10)

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Top-level catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
}

/// `PostgreSQL` connection settings.
///
/// Implements `Debug` manually to redact the connection URL.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub url: SecretString,
    /// Maximum pool size
    pub max_connections: u32,
    /// Minimum idle connections
    pub min_connections: u32,
    /// How long to wait for a pooled connection
    pub acquire_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or a numeric
    /// setting does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("CATALOG_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("CATALOG_DATABASE_URL".to_string()))?;

        let max_connections =
            parse_or_default(&lookup, "CATALOG_DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let min_connections =
            parse_or_default(&lookup, "CATALOG_DB_MIN_CONNECTIONS", DEFAULT_MIN_CONNECTIONS)?;
        if min_connections > max_connections {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_DB_MIN_CONNECTIONS".to_string(),
                format!("must not exceed CATALOG_DB_MAX_CONNECTIONS ({max_connections})"),
            ));
        }
        let acquire_timeout = Duration::from_secs(parse_or_default(
            &lookup,
            "CATALOG_DB_ACQUIRE_TIMEOUT_SECS",
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?);

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
                min_connections,
                acquire_timeout,
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CatalogConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CatalogConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("CATALOG_DATABASE_URL", "postgres://localhost/catalog")]).unwrap();

        assert_eq!(
            config.database.url.expose_secret(),
            "postgres://localhost/catalog"
        );
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_falls_back_to_database_url() {
        let config = load(&[("DATABASE_URL", "postgres://fallback/db")]).unwrap();
        assert_eq!(config.database.url.expose_secret(), "postgres://fallback/db");
    }

    #[test]
    fn test_missing_url() {
        let err = load(&[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable: CATALOG_DATABASE_URL"
        );
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[
            ("CATALOG_DATABASE_URL", "postgres://localhost/catalog"),
            ("CATALOG_DB_MAX_CONNECTIONS", "lots"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CATALOG_DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let err = load(&[
            ("CATALOG_DATABASE_URL", "postgres://localhost/catalog"),
            ("CATALOG_DB_MAX_CONNECTIONS", "2"),
            ("CATALOG_DB_MIN_CONNECTIONS", "5"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CATALOG_DB_MIN_CONNECTIONS"));
    }

    #[test]
    fn test_debug_redacts_url() {
        let config = load(&[("CATALOG_DATABASE_URL", "postgres://user:hunter2@db/catalog")]).unwrap();
        let debug = format!("{:?}", config.database);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }
}
