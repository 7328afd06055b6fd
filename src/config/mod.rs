use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub pagination: PaginationConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Pagination bounds shared by the request validator and the service
/// defaulting path. These are part of the list endpoint's externally
/// observable contract, so every environment preset carries the same values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub skip_default: i64,
    pub skip_min: i64,
    pub take_default: i64,
    pub take_min: i64,
    pub take_max: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub enable_query_logging: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Pagination overrides
        if let Ok(v) = env::var("PAGINATION_SKIP_DEFAULT") {
            self.pagination.skip_default = v.parse().unwrap_or(self.pagination.skip_default);
        }
        if let Ok(v) = env::var("PAGINATION_TAKE_DEFAULT") {
            self.pagination.take_default = v.parse().unwrap_or(self.pagination.take_default);
        }
        if let Ok(v) = env::var("PAGINATION_TAKE_MIN") {
            self.pagination.take_min = v.parse().unwrap_or(self.pagination.take_min);
        }
        if let Ok(v) = env::var("PAGINATION_TAKE_MAX") {
            self.pagination.take_max = v.parse().unwrap_or(self.pagination.take_max);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs = v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_QUERY_LOGGING") {
            self.database.enable_query_logging = v.parse().unwrap_or(self.database.enable_query_logging);
        }

        self
    }

    fn pagination_defaults() -> PaginationConfig {
        PaginationConfig {
            skip_default: 0,
            skip_min: 0,
            take_default: 10,
            take_min: 1,
            take_max: 100,
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            pagination: Self::pagination_defaults(),
            database: DatabaseConfig {
                max_connections: 10,
                acquire_timeout_secs: 30,
                enable_query_logging: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            pagination: Self::pagination_defaults(),
            database: DatabaseConfig {
                max_connections: 20,
                acquire_timeout_secs: 10,
                enable_query_logging: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            pagination: Self::pagination_defaults(),
            database: DatabaseConfig {
                max_connections: 50,
                acquire_timeout_secs: 5,
                enable_query_logging: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
