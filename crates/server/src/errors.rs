use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Message;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error response carrying a `{"message": ...}` body.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Map a service failure: not-found kinds become 404 with `not_found`,
    /// bad input 400, anything else is logged and answered with `fallback`.
    pub fn from_service(e: ServiceError, not_found: &str, fallback: &str) -> Self {
        if e.is_not_found() {
            Self::new(StatusCode::NOT_FOUND, not_found)
        } else if e.is_validation() {
            Self::new(StatusCode::BAD_REQUEST, e.to_string())
        } else {
            error!(error = %e, "request_failed");
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Message::new(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("media uploader unavailable: {0}")]
    Media(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn not_found_maps_to_404_with_given_message() {
        let e = JsonApiError::from_service(ServiceError::PropertyNotFound(Uuid::nil()), "Property does not exist", "boom");
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, "Property does not exist");
    }

    #[test]
    fn store_failure_hides_cause() {
        let e = JsonApiError::from_service(ServiceError::Db("connection reset".into()), "missing", "Failed to create property, please try again later");
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Failed to create property, please try again later");
    }

    #[test]
    fn validation_maps_to_400() {
        let e = JsonApiError::from_service(ServiceError::Validation("price must be >= 0".into()), "missing", "boom");
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert!(e.message.contains("price"));
    }
}
