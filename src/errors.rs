// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Service temporarily unavailable")]
    #[allow(dead_code)]
    ServiceUnavailable,
}

/// Convert TravelError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for TravelError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = match self {
            TravelError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            TravelError::AlreadyExists(_) => (StatusCode::CONFLICT, "ALREADY_EXISTS"),
            TravelError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            TravelError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            TravelError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            TravelError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            TravelError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            TravelError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            TravelError::ExternalApiError(_) => (StatusCode::BAD_GATEWAY, "EXTERNAL_API_ERROR"),
            TravelError::RateLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED")
            }
            TravelError::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            TravelError::NotFound(_) => StatusCode::NOT_FOUND,
            TravelError::AlreadyExists(_) => StatusCode::CONFLICT,
            TravelError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TravelError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TravelError::ValidationError(_) => StatusCode::BAD_REQUEST,
            TravelError::Unauthorized => StatusCode::UNAUTHORIZED,
            TravelError::Forbidden => StatusCode::FORBIDDEN,
            TravelError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TravelError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            TravelError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            TravelError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
