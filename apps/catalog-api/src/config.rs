//! Configuration for the catalog API

use core_config::{
    env_or_default, env_parse_or_default, env_required, server::ServerConfig, ConfigError, FromEnv,
};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Which repository adapter serves the product operations.
///
/// The adapters are behaviorally equivalent; `Sql` exists to exercise the
/// raw-statement path and `Memory` runs without PostgreSQL (dev/test).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Orm,
    Sql,
    Memory,
}

impl Backend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "orm" => Ok(Backend::Orm),
            "sql" => Ok(Backend::Sql),
            "memory" => Ok(Backend::Memory),
            other => Err(ConfigError::ParseError {
                key: "CATALOG_BACKEND".to_string(),
                details: format!("unknown backend '{}', expected orm|sql|memory", other),
            }),
        }
    }
}

/// Credentials of the single administrative account
#[derive(Clone, Debug)]
pub struct AdminCredentials {
    pub login: String,
    pub password: String,
}

impl FromEnv for AdminCredentials {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            login: env_or_default("ADMIN_LOGIN", "admin"),
            password: env_required("ADMIN_PASSWORD")?,
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub backend: Backend,
    /// Present unless the in-memory backend is selected
    pub postgres: Option<PostgresConfig>,
    pub admin: AdminCredentials,
    pub session_secret: String,
    pub session_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let backend = Backend::parse(&env_or_default("CATALOG_BACKEND", "orm"))?;

        let postgres = match backend {
            Backend::Memory => None,
            Backend::Orm | Backend::Sql => Some(PostgresConfig::from_env()?),
        };

        Ok(Self {
            environment,
            server,
            backend,
            postgres,
            admin: AdminCredentials::from_env()?,
            session_secret: env_required("SESSION_SECRET")?,
            session_ttl_minutes: env_parse_or_default("SESSION_TTL_MINUTES", "30")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_VARS: [(&str, Option<&str>); 4] = [
        ("ADMIN_PASSWORD", Some("hunter2")),
        ("SESSION_SECRET", Some("secret")),
        ("CATALOG_BACKEND", Some("memory")),
        ("DATABASE_URL", None),
    ];

    #[test]
    fn test_memory_backend_needs_no_database_url() {
        temp_env::with_vars(BASE_VARS, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.backend, Backend::Memory);
            assert!(config.postgres.is_none());
            assert_eq!(config.admin.login, "admin");
        });
    }

    #[test]
    fn test_database_backend_requires_database_url() {
        temp_env::with_vars(
            [
                ("ADMIN_PASSWORD", Some("hunter2")),
                ("SESSION_SECRET", Some("secret")),
                ("CATALOG_BACKEND", Some("sql")),
                ("DATABASE_URL", None),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        temp_env::with_vars(
            [
                ("ADMIN_PASSWORD", Some("hunter2")),
                ("SESSION_SECRET", Some("secret")),
                ("CATALOG_BACKEND", Some("mongodb")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_backend_parse_is_case_insensitive() {
        assert_eq!(Backend::parse("ORM").unwrap(), Backend::Orm);
        assert_eq!(Backend::parse("Sql").unwrap(), Backend::Sql);
    }

    #[test]
    fn test_missing_admin_password_is_an_error() {
        temp_env::with_vars(
            [
                ("ADMIN_PASSWORD", None::<&str>),
                ("SESSION_SECRET", Some("secret")),
                ("CATALOG_BACKEND", Some("memory")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
