//! Cosmos DB (Mongo API) 连通性检查
//!
//! Inserts one device reading into `iotdb.readings` and prints the first
//! 10 documents of the collection.

use common::config::{CosmosConfig, ProcessEnv};
use common::errors::{AppError, AppResult};
use mongodb::bson::{doc, DateTime};
use mongodb::options::{ClientOptions, Credential};
use mongodb::Client;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One device reading document.
#[derive(Debug, Serialize, Deserialize)]
struct Reading {
    device: String,
    temp: i32,
    ts: DateTime,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = CosmosConfig::resolve(&ProcessEnv)?;
    for reading in insert_and_list(&config).await? {
        println!("{reading:?}");
    }
    Ok(())
}

/// Insert one reading, then list up to 10 documents on the same client.
async fn insert_and_list(config: &CosmosConfig) -> AppResult<Vec<Reading>> {
    let mut options = ClientOptions::parse(&config.uri)
        .await
        .map_err(|e| AppError::Configuration(vec![format!("COSMOS_MONGO_URI ({e})")]))?;
    options.credential = Some(
        Credential::builder()
            .username(config.username.clone())
            .password(config.password.clone())
            .build(),
    );

    let client =
        Client::with_options(options).map_err(|e| AppError::Connection(e.to_string()))?;
    let db = client.database("iotdb");

    // The client connects lazily; ping first so auth and network failures
    // surface as connection errors rather than operation errors.
    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| AppError::Connection(e.to_string()))?;

    let readings = db.collection::<Reading>("readings");
    readings
        .insert_one(Reading {
            device: "sensor-001".to_string(),
            temp: 26,
            ts: DateTime::now(),
        })
        .await
        .map_err(|e| AppError::Operation(e.to_string()))?;

    let mut cursor = readings
        .find(doc! {})
        .limit(10)
        .await
        .map_err(|e| AppError::Operation(e.to_string()))?;

    let mut docs = Vec::new();
    while cursor
        .advance()
        .await
        .map_err(|e| AppError::Operation(e.to_string()))?
    {
        docs.push(
            cursor
                .deserialize_current()
                .map_err(|e| AppError::Operation(e.to_string()))?,
        );
    }
    Ok(docs)
}
