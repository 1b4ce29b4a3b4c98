use std::sync::Arc;

use roi_app::ProjectionOptions;
use roi_engine::CostParameters;
use roi_results::ProjectionStore;
use tracing::info;

use super::{config::Config, error::ServerError, metrics::RequestMetrics};

pub struct State {
    pub config: Config,
    pub options: ProjectionOptions,
    pub store: Option<ProjectionStore>,
    pub metrics: RequestMetrics,
}

impl State {
    /// Opens the archive when one is configured. Every projection is then
    /// archived as it is computed.
    pub fn new(config: Config) -> Result<Arc<Self>, ServerError> {
        let store = match &config.archive_dir {
            Some(dir) => {
                info!("Archiving projections under {}", dir.display());
                Some(ProjectionStore::new(dir.clone())?)
            }
            None => None,
        };

        let options = ProjectionOptions {
            params: CostParameters::default(),
            in_house: config.in_house,
            save: store.is_some(),
        };

        Ok(Arc::new(Self {
            config,
            options,
            store,
            metrics: RequestMetrics::new(),
        }))
    }
}
