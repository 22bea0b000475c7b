//! Shared data models.

use serde::Serialize;
use utoipa::ToSchema;

/// One row of the products listing.
///
/// `price` is nullable in the source table; NULL serializes as JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Option<f64>,
}
