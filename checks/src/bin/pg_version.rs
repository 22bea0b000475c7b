//! PostgreSQL 连通性检查
//!
//! Opens one connection per the resolved `PG*` configuration, runs
//! `SELECT version()` and prints the version string. No pool, no retry.

use std::str::FromStr;
use std::time::Duration;

use common::config::{PgConfig, ProcessEnv};
use common::errors::{AppError, AppResult};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{Connection, PgConnection};
use tokio::time::timeout;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = PgConfig::resolve(&ProcessEnv)?;
    let version = fetch_version(&config).await?;
    println!("{version}");
    Ok(())
}

/// Single-shot version query over a fresh connection.
async fn fetch_version(config: &PgConfig) -> AppResult<String> {
    let ssl_mode = PgSslMode::from_str(&config.sslmode)
        .map_err(|_| AppError::Configuration(vec!["PGSSLMODE".to_string()]))?;
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.database)
        .ssl_mode(ssl_mode);

    let mut conn = timeout(CONNECT_TIMEOUT, PgConnection::connect_with(&options))
        .await
        .map_err(|_| AppError::Connection(format!("timed out connecting to {}", config.host)))?
        .map_err(|e| AppError::Connection(e.to_string()))?;

    let result: Result<String, sqlx::Error> = sqlx::query_scalar("SELECT version()")
        .fetch_one(&mut conn)
        .await;

    // Release the connection on both paths before surfacing the outcome.
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "closing connection failed");
    }

    result.map_err(|e| AppError::Operation(e.to_string()))
}
