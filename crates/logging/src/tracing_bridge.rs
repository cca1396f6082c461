//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation driven by [`LogConfig`].
//!
//! The `PGCONNECT_LOG` environment variable, when set to a valid filter,
//! replaces the directive derived from the configuration.

use tracing_subscriber::EnvFilter;

use super::config::LogConfig;

/// Environment variable overriding the configured filter.
pub const LOG_ENV_VAR: &str = "PGCONNECT_LOG";

/// Error returned when a global subscriber is already installed.
pub type TryInitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builds the filter for `config`, honouring [`LOG_ENV_VAR`].
#[must_use]
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    let override_directive = std::env::var(LOG_ENV_VAR).ok();
    env_filter_with_override(config, override_directive.as_deref())
}

/// Builds the filter for `config`, preferring `override_directive` when it parses.
#[must_use]
pub fn env_filter_with_override(config: &LogConfig, override_directive: Option<&str>) -> EnvFilter {
    override_directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(config.directive()))
}

/// Installs a global fmt subscriber for `config`.
///
/// Returns an error instead of panicking when a subscriber is already set.
pub fn try_init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.with_target)
        .try_init()
}

/// Installs a subscriber that writes through the test harness capture.
pub fn try_init_test_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.with_target)
        .with_test_writer()
        .try_init()
}
