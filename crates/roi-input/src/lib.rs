//! roi-input: request schema, catalog, and validation for ROI projections.
//!
//! Wire bodies (`schema`) are deliberately loose so that `validate` can
//! reject bad values with the offending field named. Validation turns a
//! wire body into one of the normalized inputs in `normalized`, which is
//! what the engine consumes.

pub mod catalog;
pub mod normalized;
pub mod schema;
pub mod validate;

pub use catalog::{CardType, Feature, FeatureSet};
pub use normalized::{ApplicationInput, AutomaticInput, ManualInput, RoiInput};
pub use schema::*;
pub use validate::{
    MAX_APPLICATION_CARDS, MAX_APPLICATION_MONTHS, MAX_MONTHLY_VOLUME, MAX_PROJECTION_YEARS,
    ValidationError, validate_application, validate_auto, validate_manual, validate_request,
};

pub type InputResult<T> = Result<T, InputError>;

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a tagged scenario (`calculationType: auto | manual`) from YAML and validate it.
pub fn load_yaml(path: &std::path::Path) -> InputResult<RoiInput> {
    let content = std::fs::read_to_string(path)?;
    let request: RoiRequest = serde_yaml::from_str(&content)?;
    Ok(validate_request(&request)?)
}

/// Load a tagged scenario from JSON and validate it.
pub fn load_json(path: &std::path::Path) -> InputResult<RoiInput> {
    let content = std::fs::read_to_string(path)?;
    let request: RoiRequest = serde_json::from_str(&content)?;
    Ok(validate_request(&request)?)
}

/// Load a scenario file, picking the format from the extension (`.yaml`/`.yml`, else JSON).
pub fn load_scenario(path: &std::path::Path) -> InputResult<RoiInput> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => load_yaml(path),
        _ => load_json(path),
    }
}

/// Load an application form body from JSON and validate it.
pub fn load_application(path: &std::path::Path) -> InputResult<ApplicationInput> {
    let content = std::fs::read_to_string(path)?;
    let request: ApplicationRequest = serde_json::from_str(&content)?;
    Ok(validate_application(&request)?)
}
