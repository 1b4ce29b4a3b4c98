//! Error types for projection operations.

use roi_core::RoiError;
use roi_input::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid cost parameters: {what}")]
    Parameters { what: String },

    #[error("Numeric error: {0}")]
    Numeric(#[from] RoiError),
}

pub type EngineResult<T> = Result<T, EngineError>;
