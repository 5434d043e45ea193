//! Library configuration sections.
//!
//! These are embedded in the server's configuration and can be supplied from
//! any source `serde` understands. Each section validates itself.
//!
//! ```yaml
//! dataset:
//!   path: "movies5000.json.gz"
//!   cache: process
//!
//! telemetry:
//!   enabled: true
//!   service_name: "movies-demo"
//!   service_version: "0.1.0"
//!   environment: "dev"
//!
//! synthetic:
//!   fibonacci: [30, 29]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest Fibonacci argument the synthetic load hook accepts.
pub const MAX_SYNTHETIC_FIBONACCI: u32 = 45;

/// When the dataset is (re)read from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Load once, share for the process lifetime.
    #[default]
    Process,
    /// Load on every request.
    PerRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Relative paths resolve against the executable's directory.
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub cache: CachePolicy,
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "dataset.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the dataset path against `base` when it is relative.
    pub fn resolve_against(&self, base: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            base.join(&self.path)
        }
    }

    /// Resolve the dataset path against the running executable's directory,
    /// falling back to the working directory when that cannot be determined.
    pub fn resolved_path(&self) -> PathBuf {
        let base = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        self.resolve_against(&base)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            cache: CachePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "true_value")]
    pub enabled: bool,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    #[serde(default = "default_service_version")]
    pub service_version: String,

    #[serde(default = "default_environment")]
    pub environment: String,
}

impl TelemetryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "telemetry.service_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            service_name: default_service_name(),
            service_version: default_service_version(),
            environment: default_environment(),
        }
    }
}

/// Synthetic CPU load run before each `/movies` pipeline.
///
/// Exists only to give a profiler something to sample. Empty by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticLoadConfig {
    /// Arguments for naive recursive Fibonacci, computed in order.
    #[serde(default)]
    pub fibonacci: Vec<u32>,
}

impl SyntheticLoadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(n) = self
            .fibonacci
            .iter()
            .find(|&&n| n > MAX_SYNTHETIC_FIBONACCI)
        {
            return Err(ConfigError::Validation(format!(
                "synthetic.fibonacci values must be <= {MAX_SYNTHETIC_FIBONACCI}, got {n}"
            )));
        }
        Ok(())
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("movies5000.json.gz")
}
fn true_value() -> bool {
    true
}
fn default_service_name() -> String {
    "movies-demo".to_string()
}
fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
fn default_environment() -> String {
    "dev".to_string()
}
