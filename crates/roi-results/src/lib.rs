//! roi-results: response shapes and the projection archive.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::compute_projection_id;
pub use store::ProjectionStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Projection not found: {projection_id}")]
    ProjectionNotFound { projection_id: String },

    #[error("Archived projection {projection_id} is corrupt: {reason}")]
    Corrupt {
        projection_id: String,
        reason: &'static str,
    },

    #[error("Invalid projection id: {0}")]
    InvalidId(String),
}
