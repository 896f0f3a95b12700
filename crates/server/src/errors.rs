use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error response rendered as `{"error": <title>, "details": <payload|null>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<serde_json::Value>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, details: Option<String>) -> Self {
        Self { status, error: error.to_string(), details: details.map(serde_json::Value::String) }
    }

    pub fn with_details(status: StatusCode, error: &str, details: serde_json::Value) -> Self {
        Self { status, error: error.to_string(), details: Some(details) }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.error, details = ?self.details, "request failed");
        }
        let body = serde_json::json!({"error": self.error, "details": self.details});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(violations) => JsonApiError::with_details(
                StatusCode::BAD_REQUEST,
                "Validation Error",
                serde_json::to_value(&violations).unwrap_or(serde_json::Value::Null),
            ),
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            other => JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(other.to_string())),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Request Body", Some(rejection.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Id", Some(rejection.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl From<ServiceError> for StartupError {
    fn from(e: ServiceError) -> Self {
        StartupError::Storage(e.to_string())
    }
}

impl From<models::errors::ModelError> for StartupError {
    fn from(e: models::errors::ModelError) -> Self {
        StartupError::Storage(e.to_string())
    }
}
