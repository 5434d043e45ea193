use crate::config::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use movies::{DatasetSource, MoviePipeline, SyntheticLoad, Telemetry};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Movie pipeline (shared across requests; dataset cached per its policy)
    pub pipeline: Arc<MoviePipeline>,

    /// Prometheus renderer, present when a recorder was installed
    pub metrics: Option<PrometheusHandle>,

    /// Server start time for uptime reporting
    pub started_at: Instant,
}

impl ServerState {
    /// Create new server state from configuration
    pub fn new(config: ServerConfig) -> Self {
        let telemetry = Telemetry::new(&config.telemetry);
        let source = DatasetSource::from_config(&config.dataset);
        Self::with_source(config, source, telemetry)
    }

    /// Create server state over an explicit dataset source
    pub fn with_source(config: ServerConfig, source: DatasetSource, telemetry: Telemetry) -> Self {
        let synthetic = SyntheticLoad::from_config(&config.synthetic);
        let pipeline =
            Arc::new(MoviePipeline::new(source, telemetry).with_synthetic_load(synthetic));

        Self {
            config: Arc::new(config),
            pipeline,
            metrics: None,
            started_at: Instant::now(),
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
