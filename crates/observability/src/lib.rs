//! Tracing/logging setup shared by binaries and test harnesses.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogFormat, ObservabilityConfig};

/// Initialize process-wide logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    crate::tracing::init(&ObservabilityConfig::from_env());
}

/// Initialize process-wide logging with an explicit configuration.
pub fn init_with(config: &ObservabilityConfig) {
    crate::tracing::init(config);
}
