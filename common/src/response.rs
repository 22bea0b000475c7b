//! API response envelope.
//!
//! Failed requests share this format; data endpoints return bare JSON
//! bodies, so the envelope only ever carries error details.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response wrapper.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse {
    /// Whether the request was successful.
    pub success: bool,

    /// Error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,

    /// Response metadata.
    pub meta: ResponseMeta,
}

/// Error details carried in failed responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g. "CONFIGURATION_ERROR").
    pub code: String,

    /// Human-readable error message.
    pub message: String,
}

/// Response metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResponseMeta {
    /// Response timestamp.
    pub timestamp: DateTime<Utc>,
}

impl ApiResponse {
    /// Creates an error response.
    pub fn err(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(ApiErrorBody {
                code: code.into(),
                message: message.into(),
            }),
            meta: ResponseMeta {
                timestamp: Utc::now(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn err_carries_code_and_message() {
        let value =
            serde_json::to_value(ApiResponse::err("CONNECTION_ERROR", "refused")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "CONNECTION_ERROR");
        assert_eq!(value["error"]["message"], "refused");
    }

    #[test]
    fn meta_carries_a_timestamp() {
        let value = serde_json::to_value(ApiResponse::err("OPERATION_ERROR", "x")).unwrap();
        assert!(value["meta"]["timestamp"].is_string());
    }
}
