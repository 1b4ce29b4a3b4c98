//! Error types for the roi-app service layer.

use std::path::PathBuf;

use roi_input::ValidationError;

/// Application error type shared by the CLI and the server.
///
/// Validation failures keep their typed form so callers can report the
/// offending field; other backend errors are flattened to messages.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Failed to read cost parameters from {path}: {message}")]
    Parameters { path: PathBuf, message: String },

    #[error("Projection error: {0}")]
    Engine(String),

    #[error("Archive error: {0}")]
    Results(String),

    #[error("Projection not found: {0}")]
    ProjectionNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for roi-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<roi_input::InputError> for AppError {
    fn from(err: roi_input::InputError) -> Self {
        match err {
            roi_input::InputError::Validation(v) => AppError::Validation(v),
            other => AppError::Input(other.to_string()),
        }
    }
}

impl From<roi_engine::EngineError> for AppError {
    fn from(err: roi_engine::EngineError) -> Self {
        match err {
            roi_engine::EngineError::Validation(v) => AppError::Validation(v),
            other => AppError::Engine(other.to_string()),
        }
    }
}

impl From<roi_results::ResultsError> for AppError {
    fn from(err: roi_results::ResultsError) -> Self {
        match err {
            roi_results::ResultsError::ProjectionNotFound { projection_id } => {
                AppError::ProjectionNotFound(projection_id)
            }
            roi_results::ResultsError::InvalidId(id) => {
                AppError::InvalidInput(format!("invalid projection id '{id}'"))
            }
            other => AppError::Results(other.to_string()),
        }
    }
}
