//! Response types for the HRMS API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API. Every failure reaches the client as an [`ApiError`]
//! body, the "toast" a front end shows.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::HrmsError;
use crate::models::{Employee, Identity, RoleSet};
use crate::roles::ResolutionSource;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok".
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Body of `GET /me`: who the caller is and what they may do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// The presented identity.
    pub identity: Identity,
    /// Resolved roles.
    pub roles: RoleSet,
    /// Which resolver branch produced the roles.
    pub source: ResolutionSource,
    /// The caller's directory record.
    pub employee: Option<Employee>,
    /// Unread notifications of the caller.
    pub unread_notifications: usize,
}

/// Body of bulk update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedResponse {
    /// Number of records changed.
    pub updated: usize,
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<HrmsError> for ApiErrorResponse {
    fn from(error: HrmsError) -> Self {
        let message = error.to_string();
        match error {
            HrmsError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            HrmsError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            HrmsError::NotFound { entity, .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "NOT_FOUND",
                    message,
                    format!("No {} with this identifier is visible to you", entity),
                ),
            },
            HrmsError::Validation { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("VALIDATION_ERROR", message, field),
            },
            HrmsError::Unauthenticated => ApiErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                error: ApiError::with_details(
                    "UNAUTHENTICATED",
                    message,
                    "Send the caller's email in the x-user-email header",
                ),
            },
            HrmsError::Forbidden { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("FORBIDDEN", message),
            },
            HrmsError::Conflict { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("CONFLICT", message),
            },
            HrmsError::InvalidTransition { from, .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "INVALID_TRANSITION",
                    message,
                    format!("current status: {}", from),
                ),
            },
        }
    }
}
