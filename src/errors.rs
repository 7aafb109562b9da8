// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for the photo service

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every failure a route or provider call can produce.
/// The enrichment pipeline never lets these escape; it degrades to the
/// fallback catalog instead. Routes map them to HTTP responses.
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl PlacesError {
    fn code(&self) -> &'static str {
        match self {
            PlacesError::NotFound(_) => "NOT_FOUND",
            PlacesError::InvalidInput(_) => "INVALID_INPUT",
            PlacesError::ValidationError(_) => "VALIDATION_ERROR",
            PlacesError::Configuration(_) => "CONFIGURATION_ERROR",
            PlacesError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            PlacesError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            PlacesError::Timeout(_) => "TIMEOUT",
            PlacesError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
        }
    }
}

/// Convert PlacesError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for PlacesError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::NotFound(_) => StatusCode::NOT_FOUND,
            PlacesError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PlacesError::ValidationError(_) => StatusCode::BAD_REQUEST,
            // A missing provider key is a server-side misconfiguration
            PlacesError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PlacesError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            PlacesError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            PlacesError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            PlacesError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PlacesError::Configuration("missing key".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PlacesError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlacesError::Timeout(Duration::from_secs(8)).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_timeout_message_keeps_sub_second_deadlines() {
        assert_eq!(
            PlacesError::Timeout(Duration::from_millis(50)).to_string(),
            "Request timed out after 50ms"
        );
        assert_eq!(
            PlacesError::Timeout(Duration::from_secs(8)).to_string(),
            "Request timed out after 8s"
        );
    }

    #[actix_rt::test]
    async fn test_error_body_shape() {
        let response = PlacesError::ExternalApiError("boom".into()).error_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "EXTERNAL_API_ERROR");
        assert_eq!(value["error"]["message"], "External API error: boom");
        assert!(value["error"]["timestamp"].is_string());
    }
}
