//! Observability context handed to the pipeline at construction time.
//!
//! Nothing here is global: the server builds one [`Telemetry`] at startup and
//! passes it down. Tests use [`Telemetry::disabled`], which hands out
//! [`tracing::Span::none`] so the pipeline behaves identically without any
//! subscriber or backend.

use std::process;

use serde::Serialize;

use crate::config::TelemetryConfig;

/// Resource attributes attached to every span the pipeline opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceResource {
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
    pub host: String,
    pub process_id: u32,
    /// Random per-process identifier, distinguishes restarts on the same host.
    pub runtime_id: String,
}

impl ServiceResource {
    pub fn from_config(config: &TelemetryConfig) -> Self {
        Self {
            service_name: config.service_name.clone(),
            service_version: config.service_version.clone(),
            environment: config.environment.clone(),
            host: hostname(),
            process_id: process::id(),
            runtime_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

fn hostname() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Span factory for named pipeline operations.
#[derive(Debug, Clone)]
pub struct Telemetry {
    enabled: bool,
    resource: ServiceResource,
}

impl Telemetry {
    pub fn new(config: &TelemetryConfig) -> Self {
        Self {
            enabled: config.enabled,
            resource: ServiceResource::from_config(config),
        }
    }

    /// A context that never records anything.
    pub fn disabled() -> Self {
        let config = TelemetryConfig {
            enabled: false,
            ..TelemetryConfig::default()
        };
        Self::new(&config)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn resource(&self) -> &ServiceResource {
        &self.resource
    }
}

/// Open a span named after the operation it bounds.
///
/// The span carries the [`ServiceResource`] attributes of `telemetry`, or is
/// [`tracing::Span::none`] when telemetry is disabled. The caller enters it for the
/// duration of the operation; dropping the guard marks the end.
///
/// ```
/// let telemetry = movies::Telemetry::disabled();
/// let _guard = movies::operation_span!(telemetry, "load_movies").entered();
/// ```
#[macro_export]
macro_rules! operation_span {
    ($telemetry:expr, $name:literal) => {{
        let telemetry: &$crate::Telemetry = &$telemetry;
        if telemetry.is_enabled() {
            let resource = telemetry.resource();
            $crate::__tracing::info_span!(
                $name,
                service.name = %resource.service_name,
                service.version = %resource.service_version,
                service.env = %resource.environment,
                host = %resource.host,
                process_id = resource.process_id,
                runtime_id = %resource.runtime_id,
            )
        } else {
            $crate::__tracing::Span::none()
        }
    }};
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new(&TelemetryConfig::default())
    }
}
