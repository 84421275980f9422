//! API configuration

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use infra_db::DatabaseConfig;
use serde::Deserialize;

/// Environment variable prefix for every setting
pub const ENV_PREFIX: &str = "API";

/// API configuration
///
/// Missing keys fall back to the `Default` values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled connections
    pub db_max_connections: u32,
    /// Minimum pooled connections
    pub db_min_connections: u32,
    /// Seconds to wait for a pooled connection
    pub db_acquire_timeout_secs: u64,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            database_url: "postgres://localhost/reimbursements".to_string(),
            db_max_connections: 10,
            db_min_connections: 2,
            db_acquire_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    ///
    /// Variables whose name or value is not UTF-8 are skipped.
    pub fn load() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::load_from(&vars)
    }

    /// Loads configuration from a set of environment variables
    ///
    /// The `API_`-prefixed variables are deserialized as a whole first. If that
    /// fails, each variable is read on its own so that one malformed value
    /// falls back to its default without discarding the others (in particular
    /// `API_JWT_SECRET`). `DATABASE_URL` is used when `API_DATABASE_URL` is unset.
    pub fn load_from(vars: &HashMap<String, String>) -> Self {
        let mut config = Self::from_source(vars).unwrap_or_else(|e| {
            // Tracing is not initialized yet; its level comes from this config
            eprintln!("Invalid {ENV_PREFIX}_* configuration ({e}), reading variables individually");
            Self::from_vars(vars)
        });

        if !vars.contains_key("API_DATABASE_URL") {
            if let Some(url) = vars.get("DATABASE_URL") {
                config.database_url = url.clone();
            }
        }

        config
    }

    /// Deserializes `API_`-prefixed variables with the `config` crate
    pub fn from_source(vars: &HashMap<String, String>) -> Result<Self, config::ConfigError> {
        let source = vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<config::Map<String, String>>();

        config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(Some(source)))
            .build()?
            .try_deserialize()
    }

    /// Reads each variable separately, keeping the default for any that is
    /// missing or does not parse
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        Self {
            host: var(vars, "API_HOST", defaults.host),
            port: var(vars, "API_PORT", defaults.port),
            jwt_secret: var(vars, "API_JWT_SECRET", defaults.jwt_secret),
            database_url: var(vars, "API_DATABASE_URL", defaults.database_url),
            db_max_connections: var(vars, "API_DB_MAX_CONNECTIONS", defaults.db_max_connections),
            db_min_connections: var(vars, "API_DB_MIN_CONNECTIONS", defaults.db_min_connections),
            db_acquire_timeout_secs: var(
                vars,
                "API_DB_ACQUIRE_TIMEOUT_SECS",
                defaults.db_acquire_timeout_secs,
            ),
            log_level: var(vars, "API_LOG_LEVEL", defaults.log_level),
        }
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the pool settings for `infra_db::create_pool`
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
            .max_connections(self.db_max_connections)
            .min_connections(self.db_min_connections)
            .connect_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }
}

fn var<T>(vars: &HashMap<String, String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match vars.get(key).map(|raw| raw.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            eprintln!("Ignoring {key}: {e}");
            default
        }
        None => default,
    }
}
