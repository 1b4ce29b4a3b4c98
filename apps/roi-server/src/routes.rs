use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use roi_app::projection_service;
use roi_input::{ApplicationRequest, AutoRoiRequest, ManualRoiRequest, RoiRequest};
use roi_results::{ApplicationResponse, ProjectionManifest, RoiResponse};
use serde::Serialize;
use tracing::{debug, info};

use crate::{error::ApiError, metrics::RequestKind, state::State};

type SharedState = Arc<State>;
type Payload<T> = Result<Json<T>, JsonRejection>;

/// An archived projection as served by `GET /projections/:id`.
#[derive(Debug, Serialize)]
pub struct ProjectionRecord {
    pub manifest: ProjectionManifest,
    #[serde(flatten)]
    pub response: RoiResponse,
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ROI server is running")
}

pub async fn metrics_handler(AxumState(state): AxumState<SharedState>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.render())
}

pub async fn auto_handler(
    AxumState(state): AxumState<SharedState>,
    payload: Payload<AutoRoiRequest>,
) -> Result<Json<RoiResponse>, ApiError> {
    let count = state.metrics.record(RequestKind::Auto);
    debug!("ROI request #{count} (auto)");

    let result = match payload {
        Ok(Json(request)) => {
            let worker = Arc::clone(&state);
            blocking(move || {
                Ok(projection_service::run_auto(
                    &request,
                    &worker.options,
                    worker.store.as_ref(),
                )?)
            })
            .await
        }
        Err(rejection) => Err(rejection.into()),
    };
    respond(&state, result)
}

pub async fn manual_handler(
    AxumState(state): AxumState<SharedState>,
    payload: Payload<ManualRoiRequest>,
) -> Result<Json<RoiResponse>, ApiError> {
    let count = state.metrics.record(RequestKind::Manual);
    debug!("ROI request #{count} (manual)");

    let result = match payload {
        Ok(Json(request)) => {
            let worker = Arc::clone(&state);
            blocking(move || {
                Ok(projection_service::run_manual(
                    &request,
                    &worker.options,
                    worker.store.as_ref(),
                )?)
            })
            .await
        }
        Err(rejection) => Err(rejection.into()),
    };
    respond(&state, result)
}

/// Tagged body; the variant is chosen by `calculationType`.
pub async fn tagged_handler(
    AxumState(state): AxumState<SharedState>,
    payload: Payload<RoiRequest>,
) -> Result<Json<RoiResponse>, ApiError> {
    let kind = match &payload {
        Ok(Json(RoiRequest::Manual(_))) => RequestKind::Manual,
        _ => RequestKind::Auto,
    };
    let count = state.metrics.record(kind);
    debug!("ROI request #{count} ({kind:?})");

    let result = match payload {
        Ok(Json(request)) => {
            let worker = Arc::clone(&state);
            blocking(move || {
                Ok(projection_service::run_request(
                    &request,
                    &worker.options,
                    worker.store.as_ref(),
                )?)
            })
            .await
        }
        Err(rejection) => Err(rejection.into()),
    };
    respond(&state, result)
}

pub async fn application_handler(
    AxumState(state): AxumState<SharedState>,
    payload: Payload<ApplicationRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let count = state.metrics.record(RequestKind::Application);
    debug!("Application estimate #{count}");

    payload
        .map_err(ApiError::from)
        .and_then(|Json(request)| {
            let estimate =
                projection_service::estimate_application(&request, &state.options.params)?;
            Ok(Json(ApplicationResponse::from(estimate)))
        })
        .inspect_err(|_| state.metrics.record_rejected())
}

pub async fn list_projections_handler(
    AxumState(state): AxumState<SharedState>,
) -> Result<Json<Vec<ProjectionManifest>>, ApiError> {
    let store = state
        .store
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("Projection archive is not configured".to_string()))?;
    let store = store.clone();
    let manifests = blocking(move || Ok(projection_service::list_projections(&store)?)).await?;
    Ok(Json(manifests))
}

pub async fn projection_handler(
    AxumState(state): AxumState<SharedState>,
    Path(projection_id): Path<String>,
) -> Result<Json<ProjectionRecord>, ApiError> {
    let store = state
        .store
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("Projection archive is not configured".to_string()))?;
    let store = store.clone();
    let (manifest, result) =
        blocking(move || Ok(projection_service::load_projection(&store, &projection_id)?)).await?;
    Ok(Json(ProjectionRecord {
        manifest,
        response: RoiResponse::from(result),
    }))
}

/// Runs projection and archive work off the async workers; archive reads
/// and writes are blocking file I/O.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("worker task failed: {e}")))?
}

fn respond(
    state: &State,
    result: Result<projection_service::ProjectionResponse, ApiError>,
) -> Result<Json<RoiResponse>, ApiError> {
    match result {
        Ok(response) => {
            if response.saved {
                info!(projection_id = %response.projection_id, "Projection archived");
            }
            Ok(Json(RoiResponse::from(response.result)))
        }
        Err(err) => {
            state.metrics.record_rejected();
            debug!("Rejected ROI request: {err}");
            Err(err)
        }
    }
}
