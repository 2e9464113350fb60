use crate::models::FeeSchedule;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub billing: FeeSchedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub slow_statement_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/burial_society".to_string(),
                max_connections: 20,
                acquire_timeout_secs: 10,
                slow_statement_secs: 5,
            },
            billing: FeeSchedule::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then `config/arrears.*`, then `ARREARS_*`
    /// variables (e.g. `ARREARS_BILLING__DUE_DAY`), then `DATABASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("config/arrears").required(false))
            .add_source(
                Environment::with_prefix("ARREARS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", i64::from(defaults.database.max_connections))?
            .set_default("database.acquire_timeout_secs", defaults.database.acquire_timeout_secs as i64)?
            .set_default("database.slow_statement_secs", defaults.database.slow_statement_secs as i64)?
            .set_default("billing.monthly_fee", defaults.billing.monthly_fee.to_string())?
            .set_default("billing.late_penalty", defaults.billing.late_penalty.to_string())?
            .set_default("billing.due_day", i64::from(defaults.billing.due_day))
    }
}
