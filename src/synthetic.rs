//! Synthetic CPU load.
//!
//! Has no product meaning: it burns CPU with naive recursive Fibonacci so a
//! sampling profiler attached to the service has stacks to collect. Disabled
//! unless configured.

use crate::config::SyntheticLoadConfig;
use crate::telemetry::Telemetry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntheticLoad {
    fibonacci: Vec<u32>,
}

impl SyntheticLoad {
    pub fn from_config(config: &SyntheticLoadConfig) -> Self {
        Self {
            fibonacci: config.fibonacci.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.fibonacci.is_empty()
    }

    /// Compute every configured Fibonacci number, returning the results in order.
    pub fn run(&self, telemetry: &Telemetry) -> Vec<u64> {
        if !self.is_enabled() {
            return Vec::new();
        }
        let _span = crate::operation_span!(telemetry, "synthetic_load").entered();
        self.fibonacci
            .iter()
            .map(|&n| {
                let value = fibonacci(n);
                tracing::info!("fibonacci({n}) = {value}");
                value
            })
            .collect()
    }
}

/// Deliberately exponential.
pub fn fibonacci(n: u32) -> u64 {
    if n <= 2 {
        return 1;
    }
    fibonacci(n - 1) + fibonacci(n - 2)
}
