use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roi_app::AppError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::config::ConfigError;

/// Startup failures.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Archive error: {0}")]
    Archive(#[from] roi_results::ResultsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request failures, rendered as `{ "error": message }`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(_) | AppError::Input(_) | AppError::InvalidInput(_) => {
                ApiError::BadRequest(err.to_string())
            }
            AppError::ProjectionNotFound(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Malformed payload: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) => message,
            ApiError::Internal(detail) => {
                error!("Request failed: {detail}");
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roi_input::ValidationError;

    #[test]
    fn app_errors_map_to_status_codes() {
        let validation = ApiError::from(AppError::Validation(ValidationError::NotPositive {
            field: "years",
            value: "0".into(),
        }));
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert!(validation.to_string().contains("years"));

        let missing = ApiError::from(AppError::ProjectionNotFound("abc".into()));
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let archive = ApiError::from(AppError::Results("disk full".into()));
        assert_eq!(archive.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let response = ApiError::Internal("secret path /var/roi".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
