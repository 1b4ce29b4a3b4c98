//! Shared application service layer for the ROI calculator.
//!
//! Both the CLI and the HTTP server go through this crate: request
//! validation, projection with the configured cost model, optional
//! archiving, and queries over computed projections.

pub mod error;
pub mod projection_service;
pub mod query;

pub use error::{AppError, AppResult};
pub use projection_service::{
    ProjectionOptions, ProjectionResponse, estimate_application, list_projections,
    load_parameters, load_projection, run_auto, run_input, run_manual, run_request,
};
pub use query::{ProjectionSummary, SERIES_NAMES, extract_series, summarize};
