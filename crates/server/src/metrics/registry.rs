use hello_pipeline_config::MetricsConfig;
use prometheus::{Encoder, Registry, TextEncoder, core::Collector, proto::MetricFamily};

use super::{MetricsError, RequestCounter};

/// Rendered Prometheus text exposition together with its content type.
#[derive(Debug, Clone)]
pub struct Exposition {
    pub body: String,
    pub content_type: String,
}

/// Handle to the service's Prometheus registry.
///
/// Constructed once at startup and shared through [`crate::state::AppState`].
/// Clones point at the same underlying registry and counters.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Registry,
    http_requests: RequestCounter,
}

impl MetricsRegistry {
    /// Create an isolated registry with the request counter already registered.
    pub fn new(prefix: Option<&str>) -> Result<Self, MetricsError> {
        let registry = Registry::new_custom(prefix.map(str::to_string), None)?;
        let http_requests = RequestCounter::new()?;

        let metrics = Self {
            registry,
            http_requests,
        };
        metrics.register(metrics.http_requests.collector())?;

        Ok(metrics)
    }

    /// Build the registry described by the service configuration.
    pub fn from_config(config: &MetricsConfig) -> Result<Self, MetricsError> {
        let metrics = Self::new(config.prefix())?;
        if config.collect_default {
            metrics.collect_default_metrics()?;
        }
        Ok(metrics)
    }

    /// Register an additional collector.
    ///
    /// Fails with [`MetricsError::AlreadyRegistered`] when a metric of the same
    /// name is already present, whatever its help text or labels.
    pub fn register(&self, collector: Box<dyn Collector>) -> Result<(), MetricsError> {
        let name = collector
            .desc()
            .first()
            .map(|desc| desc.fq_name.clone())
            .unwrap_or_default();

        match self.registry.register(collector) {
            Ok(()) => Ok(()),
            Err(prometheus::Error::AlreadyReg) => Err(MetricsError::AlreadyRegistered(name)),
            Err(e) => Err(e.into()),
        }
    }

    /// Register the process metrics bundle for the running process.
    ///
    /// Calling this twice on the same registry fails as a duplicate registration.
    #[cfg(target_os = "linux")]
    pub fn collect_default_metrics(&self) -> Result<(), MetricsError> {
        use prometheus::process_collector::ProcessCollector;

        self.register(Box::new(ProcessCollector::for_self()))?;
        tracing::debug!("Registered process metrics collector");
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    pub fn collect_default_metrics(&self) -> Result<(), MetricsError> {
        tracing::warn!("Process metrics are only available on Linux, skipping");
        Ok(())
    }

    pub fn http_requests(&self) -> &RequestCounter {
        &self.http_requests
    }

    /// Snapshot every registered metric family.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Encode all registered metrics in the Prometheus text format.
    pub fn serialize(&self) -> Result<Exposition, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;

        Ok(Exposition {
            body: String::from_utf8(buffer)?,
            content_type: encoder.format_type().to_string(),
        })
    }
}
