//! Shared HTTP error envelope and domain-error mapping.
//!
//! Every endpoint reports failures with the same flat JSON shape, and every
//! area funnels its failures through [`ApiError`] so status codes stay
//! consistent across the API.

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response with details.
    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(DomainError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let DomainError {
            code,
            message,
            details,
        } = self.0;

        let status = match code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat
            | ErrorCode::MalformedCsv
            | ErrorCode::MissingDataTrigger
            | ErrorCode::EmptyDataset
            | ErrorCode::DimensionMismatch
            | ErrorCode::TooFewSamples
            | ErrorCode::TooFewVariables
            | ErrorCode::TooFewGroups => StatusCode::BAD_REQUEST,
            ErrorCode::ContextNotFound => StatusCode::NOT_FOUND,
            ErrorCode::AIProviderError => StatusCode::BAD_GATEWAY,
            ErrorCode::RateLimited => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::ExportFailed | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = if details.is_empty() {
            ErrorResponse::new(code.to_string(), message)
        } else {
            ErrorResponse::with_details(
                code.to_string(),
                message,
                serde_json::to_value(details).unwrap_or_default(),
            )
        };

        (status, Json(body)).into_response()
    }
}
