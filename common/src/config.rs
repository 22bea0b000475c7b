//! Connection configuration resolvers.
//!
//! Each backing service gets a small immutable config struct resolved from a
//! [`ConfigSource`] (the process environment in production, a `HashMap` in
//! tests). Resolution is pure: no network activity, no ambient lookups from
//! inside operation logic. Required keys missing from the source are all
//! reported together, before any connection attempt.

use std::collections::HashMap;

use crate::errors::{AppError, AppResult};

/// Default ODBC driver identifier for Azure SQL.
pub const DEFAULT_SQL_DRIVER: &str = "{ODBC Driver 18 for SQL Server}";

/// Default TDS port used when the server value carries no `host,port` suffix.
pub const DEFAULT_SQL_PORT: u16 = 1433;

/// A source of named configuration values.
pub trait ConfigSource {
    /// Returns the value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment as a configuration source.
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

fn value_or(src: &dyn ConfigSource, key: &str, default: &str) -> String {
    src.get(key).unwrap_or_else(|| default.to_string())
}

fn port_or(src: &dyn ConfigSource, key: &str, default: u16) -> AppResult<u16> {
    match src.get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Configuration(vec![key.to_string()])),
        None => Ok(default),
    }
}

/// Returns true for "yes"/"true"/"1" (case-insensitive) flag values.
pub fn flag_enabled(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "yes" | "true" | "1")
}

/// Resolved Azure SQL connection configuration.
///
/// Either a precomposed connection string used verbatim, or individual
/// fields assembled into one. The individual fields are ignored entirely
/// when the override is present.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlServerConfig {
    /// `AZURE_SQL_CONNECTION_STRING`, kept verbatim.
    ConnectionString(String),
    /// Assembled from the individual `AZURE_SQL_*` fields.
    Fields(SqlServerFields),
}

/// Individual Azure SQL connection fields with documented defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlServerFields {
    pub server: String,
    pub database: String,
    pub username: String,
    pub password: String,
    pub driver: String,
    pub encrypt: String,
    pub trust_server_cert: String,
}

impl SqlServerConfig {
    /// Resolves the Azure SQL configuration.
    ///
    /// Fails with [`AppError::Configuration`] naming every missing required
    /// key when no override string is supplied. Empty values are treated
    /// the same as absent ones for the override and the required keys.
    pub fn resolve(src: &dyn ConfigSource) -> AppResult<Self> {
        // An empty override counts as unset and falls back to the
        // individual fields; an empty required field counts as missing.
        if let Some(conn_str) = src
            .get("AZURE_SQL_CONNECTION_STRING")
            .filter(|value| !value.is_empty())
        {
            return Ok(Self::ConnectionString(conn_str));
        }

        let mut missing = Vec::new();
        let mut require = |key: &str| {
            src.get(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| {
                    missing.push(key.to_string());
                    String::new()
                })
        };

        let server = require("AZURE_SQL_SERVER");
        let database = require("AZURE_SQL_DATABASE");
        let username = require("AZURE_SQL_USERNAME");
        let password = require("AZURE_SQL_PASSWORD");

        if !missing.is_empty() {
            return Err(AppError::Configuration(missing));
        }

        Ok(Self::Fields(SqlServerFields {
            server,
            database,
            username,
            password,
            driver: value_or(src, "AZURE_SQL_DRIVER", DEFAULT_SQL_DRIVER),
            encrypt: value_or(src, "AZURE_SQL_ENCRYPT", "yes"),
            trust_server_cert: value_or(src, "AZURE_SQL_TRUST_SERVER_CERT", "no"),
        }))
    }

    /// Renders the ODBC-style connection string.
    ///
    /// The override variant renders verbatim; the field variant composes
    /// `DRIVER=...;SERVER=...;DATABASE=...;UID=...;PWD=...` with the
    /// encryption and certificate flags appended. The TDS driver maps the
    /// fields directly and never consumes this string; it is kept as the
    /// canonical interchange form for ODBC consumers of the same
    /// variables, pinned by the resolver tests.
    pub fn connection_string(&self) -> String {
        match self {
            Self::ConnectionString(s) => s.clone(),
            Self::Fields(f) => format!(
                "DRIVER={};SERVER={};DATABASE={};UID={};PWD={};Encrypt={};TrustServerCertificate={}",
                f.driver, f.server, f.database, f.username, f.password, f.encrypt, f.trust_server_cert
            ),
        }
    }
}

impl SqlServerFields {
    /// Splits the server value into host and port.
    ///
    /// ODBC server values may carry a `host,port` suffix and a `tcp:` scheme
    /// prefix; the port defaults to 1433 when absent.
    pub fn host_and_port(&self) -> AppResult<(String, u16)> {
        let server = self.server.strip_prefix("tcp:").unwrap_or(&self.server);
        match server.split_once(',') {
            Some((host, port)) => {
                let port = port
                    .trim()
                    .parse()
                    .map_err(|_| AppError::Configuration(vec!["AZURE_SQL_SERVER".to_string()]))?;
                Ok((host.to_string(), port))
            }
            None => Ok((server.to_string(), DEFAULT_SQL_PORT)),
        }
    }
}

/// Resolved PostgreSQL connection configuration.
///
/// Every field has a documented default; nothing is required.
#[derive(Debug, Clone, PartialEq)]
pub struct PgConfig {
    pub database: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub sslmode: String,
}

impl PgConfig {
    pub fn resolve(src: &dyn ConfigSource) -> AppResult<Self> {
        Ok(Self {
            database: value_or(src, "PGDATABASE", "analyticsdb"),
            username: value_or(src, "PGUSER", "pgadmin"),
            password: value_or(src, "PGPASSWORD", "ChangeMe123!"),
            host: value_or(src, "PGHOST", "pgsql-demo.postgres.database.azure.com"),
            port: port_or(src, "PGPORT", 5432)?,
            sslmode: value_or(src, "PGSSLMODE", "require"),
        })
    }
}

/// Resolved Redis cache connection configuration.
///
/// Transport is always TLS; the default port is the Azure Cache TLS port.
#[derive(Debug, Clone, PartialEq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
}

impl RedisConfig {
    pub fn resolve(src: &dyn ConfigSource) -> AppResult<Self> {
        Ok(Self {
            host: value_or(src, "REDIS_HOST", "redis-demo.redis.cache.windows.net"),
            port: port_or(src, "REDIS_PORT", 6380)?,
            password: value_or(src, "REDIS_PASSWORD", "ChangeMe123!"),
        })
    }

    /// Renders the connection URL. Always `rediss://` (encrypted transport).
    pub fn url(&self) -> String {
        format!("rediss://:{}@{}:{}", self.password, self.host, self.port)
    }
}

/// Resolved Cosmos DB (Mongo API) connection configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CosmosConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
}

impl CosmosConfig {
    pub fn resolve(src: &dyn ConfigSource) -> AppResult<Self> {
        Ok(Self {
            uri: value_or(
                src,
                "COSMOS_MONGO_URI",
                "mongodb://cosmos-demo.mongo.cosmos.azure.com:10255/?ssl=true",
            ),
            username: value_or(src, "COSMOS_MONGO_USERNAME", "atul"),
            password: value_or(src, "COSMOS_MONGO_PASSWORD", "ChangeMe123!"),
        })
    }
}
