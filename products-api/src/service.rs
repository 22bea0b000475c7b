//! Single-shot products query against Azure SQL.
//!
//! Opens one TDS connection per call, runs the fixed listing query and
//! releases the connection before returning, on success and failure alike.

use std::time::Duration;

use common::config::{flag_enabled, SqlServerConfig};
use common::errors::{AppError, AppResult};
use common::models::Product;
use tiberius::numeric::Numeric;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel, Row};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

const PRODUCTS_QUERY: &str = "SELECT TOP 10 id, name, price FROM products";

/// Default connect timeout; the source leaves timeouts unspecified.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the products listing with a fresh connection.
pub async fn fetch_products(config: &SqlServerConfig) -> AppResult<Vec<Product>> {
    let mut client = connect(config).await?;
    let result = query_products(&mut client).await;

    // Release before surfacing the query outcome.
    if let Err(e) = client.close().await {
        tracing::warn!(error = %e, "closing SQL connection failed");
    }
    result
}

async fn connect(config: &SqlServerConfig) -> AppResult<Client<Compat<TcpStream>>> {
    let tds = tds_config(config)?;
    let addr = tds.get_addr();

    let tcp = timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr))
        .await
        .map_err(|_| AppError::Connection(format!("timed out connecting to {addr}")))?
        .map_err(|e| AppError::Connection(e.to_string()))?;
    tcp.set_nodelay(true)
        .map_err(|e| AppError::Connection(e.to_string()))?;

    timeout(CONNECT_TIMEOUT, Client::connect(tds, tcp.compat_write()))
        .await
        .map_err(|_| AppError::Connection(format!("timed out during handshake with {addr}")))?
        .map_err(|e| AppError::Connection(e.to_string()))
}

/// Maps the resolved configuration onto a TDS client config.
///
/// The override string is handed to the driver as-is (ADO.NET-style);
/// individual fields are mapped explicitly.
fn tds_config(config: &SqlServerConfig) -> AppResult<Config> {
    match config {
        SqlServerConfig::ConnectionString(s) => Config::from_ado_string(s)
            .map_err(|e| AppError::Configuration(vec![format!("AZURE_SQL_CONNECTION_STRING ({e})")])),
        SqlServerConfig::Fields(fields) => {
            let (host, port) = fields.host_and_port()?;
            let mut tds = Config::new();
            tds.host(host);
            tds.port(port);
            tds.database(&fields.database);
            tds.authentication(AuthMethod::sql_server(&fields.username, &fields.password));
            tds.encryption(if flag_enabled(&fields.encrypt) {
                EncryptionLevel::Required
            } else {
                EncryptionLevel::NotSupported
            });
            if flag_enabled(&fields.trust_server_cert) {
                tds.trust_cert();
            }
            Ok(tds)
        }
    }
}

async fn query_products(client: &mut Client<Compat<TcpStream>>) -> AppResult<Vec<Product>> {
    let rows = client
        .simple_query(PRODUCTS_QUERY)
        .await
        .map_err(|e| AppError::Operation(e.to_string()))?
        .into_first_result()
        .await
        .map_err(|e| AppError::Operation(e.to_string()))?;

    rows.iter().map(row_to_product).collect()
}

fn row_to_product(row: &Row) -> AppResult<Product> {
    let id = row
        .try_get::<i32, _>(0)
        .map_err(operation_err)?
        .unwrap_or_default();
    let name = row
        .try_get::<&str, _>(1)
        .map_err(operation_err)?
        .unwrap_or_default()
        .to_string();
    Ok(Product {
        id,
        name,
        price: price_column(row)?,
    })
}

/// Collapses the price column to a nullable f64.
///
/// Depending on the table definition the column arrives as float, decimal,
/// real or integer; NULL stays None.
fn price_column(row: &Row) -> AppResult<Option<f64>> {
    if let Ok(v) = row.try_get::<f64, _>(2) {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Numeric, _>(2) {
        return Ok(v.map(numeric_to_f64));
    }
    if let Ok(v) = row.try_get::<f32, _>(2) {
        return Ok(v.map(f64::from));
    }
    if let Ok(v) = row.try_get::<i32, _>(2) {
        return Ok(v.map(f64::from));
    }
    Err(AppError::Operation(
        "price column has an unsupported type".to_string(),
    ))
}

fn numeric_to_f64(n: Numeric) -> f64 {
    n.value() as f64 / 10f64.powi(n.scale() as i32)
}

fn operation_err(e: tiberius::error::Error) -> AppError {
    AppError::Operation(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_price_is_scale_adjusted() {
        assert_eq!(numeric_to_f64(Numeric::new_with_scale(999, 2)), 9.99);
        assert_eq!(numeric_to_f64(Numeric::new_with_scale(26, 0)), 26.0);
        assert_eq!(numeric_to_f64(Numeric::new_with_scale(-12345, 3)), -12.345);
    }

    #[test]
    fn override_string_reaches_the_driver() {
        let config = SqlServerConfig::ConnectionString(
            "Server=tcp:sql-demo.database.windows.net,1433;Database=salesdb;\
             User ID=sqladmin;Password=pw;Encrypt=true"
                .to_string(),
        );
        let tds = tds_config(&config).unwrap();
        assert_eq!(tds.get_addr(), "sql-demo.database.windows.net:1433");
    }

    #[test]
    fn fields_map_host_and_default_port() {
        let src: std::collections::HashMap<String, String> = [
            ("AZURE_SQL_SERVER", "sql-demo.database.windows.net"),
            ("AZURE_SQL_DATABASE", "salesdb"),
            ("AZURE_SQL_USERNAME", "sqladmin"),
            ("AZURE_SQL_PASSWORD", "pw"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let config = SqlServerConfig::resolve(&src).unwrap();
        let tds = tds_config(&config).unwrap();
        assert_eq!(tds.get_addr(), "sql-demo.database.windows.net:1433");
    }
}
