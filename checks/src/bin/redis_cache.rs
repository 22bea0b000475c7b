//! Azure Cache for Redis 连通性检查
//!
//! Writes `session:user123 = "active"` with a 60-second expiry over TLS,
//! reads it back and prints the stored value.

use std::time::Duration;

use common::config::{ProcessEnv, RedisConfig};
use common::errors::{AppError, AppResult};
use tokio::time::timeout;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SESSION_KEY: &str = "session:user123";
const SESSION_VALUE: &str = "active";
const SESSION_TTL_SECS: u64 = 60;

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

    let config = RedisConfig::resolve(&ProcessEnv)?;
    match cache_round_trip(&config).await? {
        Some(value) => println!("{value}"),
        None => println!("(nil)"),
    }
    Ok(())
}

/// Set-with-expiry then read-back on one connection.
async fn cache_round_trip(config: &RedisConfig) -> AppResult<Option<String>> {
    let client = redis::Client::open(config.url())
        .map_err(|e| AppError::Connection(e.to_string()))?;
    let mut conn = timeout(CONNECT_TIMEOUT, client.get_multiplexed_async_connection())
        .await
        .map_err(|_| AppError::Connection(format!("timed out connecting to {}", config.host)))?
        .map_err(|e| AppError::Connection(e.to_string()))?;

    redis::cmd("SETEX")
        .arg(SESSION_KEY)
        .arg(SESSION_TTL_SECS)
        .arg(SESSION_VALUE)
        .query_async::<()>(&mut conn)
        .await
        .map_err(|e| AppError::Operation(e.to_string()))?;

    // An expired or missing key comes back as None, not as an error.
    redis::cmd("GET")
        .arg(SESSION_KEY)
        .query_async::<Option<String>>(&mut conn)
        .await
        .map_err(|e| AppError::Operation(e.to_string()))
}
