//! Application configuration loaded from environment variables.
//!
//! Built once in `main` and shared through [`crate::state::AppState`];
//! handlers never read the environment.

use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;
use yap_core::domain::RegionSet;
use yap_infra::csrf::{CsrfConfig, DEFAULT_SECRET};
use yap_infra::database::DatabaseConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CSRF_SECRET must be set when RUST_ENV is production")]
    DefaultSecretInProduction,

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Send the cookie over HTTPS only. Turn off for plain-HTTP local development.
    pub secure: bool,
    pub max_age_secs: i64,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub auto_migrate: bool,
    pub csrf: CsrfConfig,
    pub session: SessionConfig,
    pub regions: RegionSet,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 8)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 1)?,
                acquire_timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "DB_ACQUIRE_TIMEOUT_SECS",
                    5,
                )?),
                busy_timeout: Duration::from_millis(parse_or(
                    &lookup,
                    "DB_BUSY_TIMEOUT_MS",
                    5_000,
                )?),
            }),
            None => None,
        };

        let ttl_secs: i64 = parse_or(&lookup, "CSRF_TOKEN_TTL_SECS", 86_400)?;
        // Tokens and the session cookie would expire on arrival
        if ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "CSRF_TOKEN_TTL_SECS",
                value: ttl_secs.to_string(),
            });
        }

        let csrf = CsrfConfig {
            secret: lookup("CSRF_SECRET").unwrap_or_else(|| DEFAULT_SECRET.to_string()),
            ttl: TimeDelta::seconds(ttl_secs),
        };

        // Warn if using default secret, refuse in production
        if csrf.is_default_secret() {
            let is_production = lookup("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default CSRF secret in production! Set CSRF_SECRET environment variable."
                );
                return Err(ConfigError::DefaultSecretInProduction);
            }
            tracing::warn!("Using default CSRF secret. Set CSRF_SECRET for production use.");
        }

        let session = SessionConfig {
            cookie_name: lookup("SESSION_COOKIE_NAME").unwrap_or_else(|| "yap-session".to_string()),
            secure: parse_bool_or(&lookup, "SESSION_COOKIE_SECURE", true)?,
            max_age_secs: csrf.ttl.num_seconds(),
        };

        let regions = lookup("YAP_REGIONS")
            .map(|raw| RegionSet::parse_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            database,
            auto_migrate: parse_bool_or(&lookup, "DB_AUTO_MIGRATE", true)?,
            csrf,
            session,
            regions,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert!(config.auto_migrate);
        assert!(config.csrf.is_default_secret());
        assert_eq!(config.csrf.ttl, TimeDelta::hours(24));
        assert_eq!(config.session.cookie_name, "yap-session");
        assert!(config.session.secure);
        assert_eq!(config.session.max_age_secs, 86_400);
        assert_eq!(config.regions, RegionSet::default());
    }

    #[test]
    fn test_database_settings() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://yap.db?mode=rwc"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();

        let db = config.database.unwrap();
        assert_eq!(db.url, "sqlite://yap.db?mode=rwc");
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.min_connections, 1);
        assert_eq!(db.acquire_timeout, Duration::from_secs(2));
        assert_eq!(db.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_busy_timeout_override() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://yap.db?mode=rwc"),
            ("DB_BUSY_TIMEOUT_MS", "250"),
        ]))
        .unwrap();

        assert_eq!(
            config.database.unwrap().busy_timeout,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_regions_and_session_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("YAP_REGIONS", "fra,ams"),
            ("SESSION_COOKIE_SECURE", "false"),
            ("CSRF_TOKEN_TTL_SECS", "600"),
        ]))
        .unwrap();

        assert!(config.regions.contains("fra"));
        assert!(!config.regions.contains("lhr"));
        assert!(!config.session.secure);
        assert_eq!(config.session.max_age_secs, 600);
    }

    #[test]
    fn test_default_secret_rejected_in_production() {
        let result = AppConfig::from_lookup(lookup_from(&[("RUST_ENV", "production")]));
        assert!(matches!(result, Err(ConfigError::DefaultSecretInProduction)));

        let config = AppConfig::from_lookup(lookup_from(&[
            ("RUST_ENV", "production"),
            ("CSRF_SECRET", "a-real-secret"),
        ]))
        .unwrap();
        assert!(!config.csrf.is_default_secret());
    }

    #[test]
    fn test_non_positive_token_ttl_is_rejected() {
        for ttl in ["0", "-60"] {
            let result = AppConfig::from_lookup(lookup_from(&[("CSRF_TOKEN_TTL_SECS", ttl)]));
            assert!(matches!(
                result,
                Err(ConfigError::Invalid { key: "CSRF_TOKEN_TTL_SECS", .. })
            ));
        }
    }

    #[test]
    fn test_garbage_numbers_are_errors() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));
    }
}
