//! Process configuration loaded from the environment.
//!
//! A `.env` file in the working directory is read first (if present); real
//! environment variables take precedence over it.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | required (`postgres://…` or `memory://`) |
//! | `HOST` / `PORT` | `0.0.0.0` / `3002` |
//! | `JWT_SECRET` | insecure dev secret |
//! | `TOKEN_TTL_MINUTES` | `60` (at most one year) |
//! | `ADMIN_EMAIL` / `ADMIN_PASSWORD` | `admin@miranda.com` / `admin` |
//! | `CORS_ORIGIN` | the dashboard's S3 website origin |
//! | `REQUEST_TIMEOUT_SECS` | `30` |
//! | `DB_MAX_CONNECTIONS` | `10` |

use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_CORS_ORIGIN: &str = "http://dashboard-miranda-mgl.s3-website.eu-west-3.amazonaws.com";
const DEV_JWT_SECRET: &str = "dev-secret";
const DEV_ADMIN_EMAIL: &str = "admin@miranda.com";
const DEV_ADMIN_PASSWORD: &str = "admin";
/// One year.
const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Which document store backs the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    InMemory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub admin_email: String,
    pub admin_password: String,
    pub cors_origin: HeaderValue,
    pub request_timeout: Duration,
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingEnvVar("DATABASE_URL"))?;
        store_kind_of(&database_url)?;

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let (admin_email, admin_password) = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => (email, password),
            (None, None) => {
                tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set; using dev credentials");
                (DEV_ADMIN_EMAIL.to_string(), DEV_ADMIN_PASSWORD.to_string())
            }
            (None, Some(_)) => return Err(ConfigError::MissingEnvVar("ADMIN_EMAIL")),
            (Some(_), None) => return Err(ConfigError::MissingEnvVar("ADMIN_PASSWORD")),
        };

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(&cors_origin).map_err(|e| ConfigError::InvalidValue {
            key: "CORS_ORIGIN",
            message: e.to_string(),
        })?;

        let token_ttl_minutes: i64 = parsed(&lookup, "TOKEN_TTL_MINUTES", 60)?;
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&token_ttl_minutes) {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_MINUTES",
                message: format!("must be between 1 and {MAX_TOKEN_TTL_MINUTES}"),
            });
        }
        let request_timeout_secs: u64 = parsed(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "REQUEST_TIMEOUT_SECS",
                message: "must be positive".to_string(),
            });
        }

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", 3002)?,
            jwt_secret,
            token_ttl: chrono::Duration::minutes(token_ttl_minutes),
            admin_email,
            admin_password,
            cors_origin,
            request_timeout: Duration::from_secs(request_timeout_secs),
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", 10)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_kind(&self) -> Result<StoreKind, ConfigError> {
        store_kind_of(&self.database_url)
    }
}

fn store_kind_of(database_url: &str) -> Result<StoreKind, ConfigError> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok(StoreKind::Postgres)
    } else if database_url.starts_with("memory://") {
        Ok(StoreKind::InMemory)
    } else {
        Err(ConfigError::InvalidValue {
            key: "DATABASE_URL",
            message: "expected a postgres:// or memory:// url".to_string(),
        })
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn database_url_is_required() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::MissingEnvVar("DATABASE_URL"));
        assert_eq!(load(&[("DATABASE_URL", "  ")]).unwrap_err(), ConfigError::MissingEnvVar("DATABASE_URL"));
    }

    #[test]
    fn defaults_apply() {
        let cfg = load(&[("DATABASE_URL", "memory://")]).unwrap();
        assert_eq!(cfg.port, 3002);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3002");
        assert_eq!(cfg.cors_origin, DEFAULT_CORS_ORIGIN);
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
        assert_eq!(cfg.token_ttl, chrono::Duration::minutes(60));
        assert_eq!(cfg.store_kind(), Ok(StoreKind::InMemory));
    }

    #[test]
    fn postgres_urls_select_postgres() {
        let cfg = load(&[("DATABASE_URL", "postgres://u:p@localhost/miranda")]).unwrap();
        assert_eq!(cfg.store_kind(), Ok(StoreKind::Postgres));
    }

    #[test]
    fn unknown_schemes_are_rejected() {
        let err = load(&[("DATABASE_URL", "mongodb://localhost/miranda")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DATABASE_URL", .. }));
    }

    #[test]
    fn bad_port_is_reported() {
        let err = load(&[("DATABASE_URL", "memory://"), ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn admin_credentials_come_in_pairs() {
        let err = load(&[("DATABASE_URL", "memory://"), ("ADMIN_EMAIL", "boss@miranda.com")]).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("ADMIN_PASSWORD"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = load(&[("DATABASE_URL", "memory://"), ("REQUEST_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "REQUEST_TIMEOUT_SECS", .. }));
    }

    #[test]
    fn token_ttl_must_fit_the_allowed_range() {
        for raw in ["0", "-5", "100000000000000"] {
            let err = load(&[("DATABASE_URL", "memory://"), ("TOKEN_TTL_MINUTES", raw)]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key: "TOKEN_TTL_MINUTES", .. }), "{raw}");
        }
        let cfg = load(&[("DATABASE_URL", "memory://"), ("TOKEN_TTL_MINUTES", "525600")]).unwrap();
        assert_eq!(cfg.token_ttl, chrono::Duration::days(365));
    }
}
