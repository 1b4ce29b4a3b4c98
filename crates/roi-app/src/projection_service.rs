//! Projection execution and archiving service.

use std::path::Path;

use roi_engine::{
    ApplicationEstimate, CostParameters, InHouseCostModel, InHouseModel, PARAMETERS_VERSION,
    ProjectionModel, RoiResult,
};
use roi_input::{
    ApplicationRequest, AutoRoiRequest, ManualRoiRequest, RoiInput, RoiRequest,
    validate_application, validate_auto, validate_manual, validate_request,
};
use roi_results::{ProjectionKind, ProjectionManifest, ProjectionStore, compute_projection_id};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Cost model and archiving options for a projection.
#[derive(Debug, Clone, Default)]
pub struct ProjectionOptions {
    pub params: CostParameters,
    pub in_house: InHouseModel,
    /// Archive the result after computing it.
    pub save: bool,
}

/// Result of one projection request.
#[derive(Debug, Clone)]
pub struct ProjectionResponse {
    pub projection_id: String,
    pub result: RoiResult,
    pub saved: bool,
}

pub fn run_auto(
    request: &AutoRoiRequest,
    options: &ProjectionOptions,
    store: Option<&ProjectionStore>,
) -> AppResult<ProjectionResponse> {
    let input = RoiInput::Automatic(validate_auto(request)?);
    run_input(&input, options, store)
}

pub fn run_manual(
    request: &ManualRoiRequest,
    options: &ProjectionOptions,
    store: Option<&ProjectionStore>,
) -> AppResult<ProjectionResponse> {
    let input = RoiInput::Manual(validate_manual(request)?);
    run_input(&input, options, store)
}

/// Validate a tagged request and project it.
pub fn run_request(
    request: &RoiRequest,
    options: &ProjectionOptions,
    store: Option<&ProjectionStore>,
) -> AppResult<ProjectionResponse> {
    let input = validate_request(request)?;
    run_input(&input, options, store)
}

/// Project an already validated input and archive it when asked to.
///
/// The projection is always recomputed; the archive is a record of past
/// results, never a cache. `saved` reports whether the archive write
/// succeeded.
pub fn run_input(
    input: &RoiInput,
    options: &ProjectionOptions,
    store: Option<&ProjectionStore>,
) -> AppResult<ProjectionResponse> {
    let model = ProjectionModel::new(options.params.clone(), options.in_house)?;
    let result = model.project(input)?;

    let projection_id = compute_projection_id(
        input,
        model.params(),
        model.in_house(),
        PARAMETERS_VERSION,
    )?;
    debug!(
        projection_id = %projection_id,
        kind = input.kind(),
        years = result.len(),
        "projection computed"
    );

    let mut saved = false;
    if options.save {
        let store = store.ok_or_else(|| {
            AppError::InvalidInput("no projection archive configured".to_string())
        })?;
        let kind = match input {
            RoiInput::Automatic(_) => ProjectionKind::Automatic,
            RoiInput::Manual(_) => ProjectionKind::Manual,
        };
        let manifest = ProjectionManifest::new(
            projection_id.clone(),
            kind,
            PARAMETERS_VERSION,
            model.in_house().name(),
            serde_json::to_value(input).map_err(|e| AppError::Results(e.to_string()))?,
        );
        // The projection is already computed; a failed write only loses the record.
        match store.save(&manifest, &result) {
            Ok(()) => {
                info!(projection_id = %projection_id, "projection archived");
                saved = true;
            }
            Err(e) => {
                warn!(projection_id = %projection_id, error = %e, "failed to archive projection");
            }
        }
    }

    Ok(ProjectionResponse {
        projection_id,
        result,
        saved,
    })
}

/// Validate an application form body and estimate its IaaS economics.
pub fn estimate_application(
    request: &ApplicationRequest,
    params: &CostParameters,
) -> AppResult<ApplicationEstimate> {
    let input = validate_application(request)?;
    debug!(
        cards = input.cards,
        months = input.months,
        card_type = %input.card_type,
        "estimating application"
    );
    Ok(roi_engine::estimate_application(&input, params)?)
}

/// Load cost parameter overrides from a YAML file.
pub fn load_parameters(path: &Path) -> AppResult<CostParameters> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::Parameters {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let params: CostParameters =
        serde_yaml::from_str(&content).map_err(|e| AppError::Parameters {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    params.validate().map_err(|e| AppError::Parameters {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(params)
}

pub fn list_projections(store: &ProjectionStore) -> AppResult<Vec<ProjectionManifest>> {
    Ok(store.list()?)
}

pub fn load_projection(
    store: &ProjectionStore,
    projection_id: &str,
) -> AppResult<(ProjectionManifest, RoiResult)> {
    let manifest = store.load_manifest(projection_id)?;
    let result = store.load_result(projection_id)?;
    Ok((manifest, result))
}
