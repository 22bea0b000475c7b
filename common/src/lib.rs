//! Shared building blocks for the Azure data service demos.
//!
//! Provides:
//! - connection configuration resolvers with layered env fallback
//! - the error taxonomy shared by the HTTP surface and the check binaries
//! - the unified API response envelope

pub mod config;
pub mod errors;
pub mod models;
pub mod response;

pub use errors::{AppError, AppResult};
