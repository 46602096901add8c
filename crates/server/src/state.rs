use crate::metrics::{MetricsError, MetricsRegistry};
use hello_pipeline_config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metrics: MetricsRegistry,
}

impl AppState {
    /// Build the state for `config`, creating the metrics registry it describes.
    pub fn new(config: AppConfig) -> Result<Self, MetricsError> {
        let metrics = MetricsRegistry::from_config(&config.metrics)?;
        Ok(Self::with_metrics(config, metrics))
    }

    pub fn with_metrics(config: AppConfig, metrics: MetricsRegistry) -> Self {
        Self {
            config: Arc::new(config),
            metrics,
        }
    }
}
