use crate::config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;

/// Postgres pool backing the member and contribution stores.
/// Statements slower than `slow_statement_secs` are logged at WARN.
pub async fn create_pool(database: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let connect_options = PgConnectOptions::from_str(&database.url)?.log_slow_statements(
        tracing::log::LevelFilter::Warn,
        Duration::from_secs(database.slow_statement_secs),
    );

    tracing::info!(
        "Connecting to Postgres (max {} connections)",
        database.max_connections
    );

    PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .connect_with(connect_options)
        .await
}
