//! HTTP boundary of the issuing ROI calculator.
//!
//! # Routes
//! - `POST /calculate-roi/auto`: automatic growth projection
//! - `POST /calculate-roi/manual`: explicit per-year card counts
//! - `POST /calculate-roi`: either of the above, tagged by `calculationType`
//! - `POST /api/calculate-roi`: estimate attached to an application form
//! - `GET /projections`, `GET /projections/:id`: archived projections,
//!   when `ROI_ARCHIVE_DIR` is set
//! - `GET /health`, `GET /metrics`
//!
//! Projection bodies come back as `{ "roiData": ... }`; failures as
//! `{ "error": "..." }` with a 4xx/5xx status.
//!
//! # Environment
//! - `ROI_PORT` (5000), `ROI_BIND` (0.0.0.0)
//! - `FRONTEND_URL` (http://localhost:5174), the allowed CORS origin
//! - `ROI_IN_HOUSE_MODEL` (`build` or `none`)
//! - `ROI_ARCHIVE_DIR` (unset: no archive)
//! - `RUST_LOG` for log filtering
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::ctrl_c;
#[cfg(unix)]
use signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod state;

use config::Config;
use error::ServerError;
use routes::{
    application_handler, auto_handler, health_handler, list_projections_handler,
    manual_handler, metrics_handler, projection_handler, tagged_handler,
};
use state::State;

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.frontend_url.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/calculate-roi/auto", post(auto_handler))
        .route("/calculate-roi/manual", post(manual_handler))
        .route("/calculate-roi", post(tagged_handler))
        .route("/api/calculate-roi", post(application_handler))
        .route("/projections", get(list_projections_handler))
        .route("/projections/:id", get(projection_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), ServerError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading configuration...");
    let config = Config::load()?;
    let address = config.address();

    info!("Initializing state...");
    let state = State::new(config)?;

    info!("Binding to {address}");
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
