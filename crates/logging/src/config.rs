//! crates/logging/src/config.rs
//! Logging configuration for negotiation diagnostics.

use super::levels::Verbosity;
use super::tracing_macros::ROOT_TARGET;

/// Controls which negotiation events reach the installed subscriber.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Detail level for `pgconnect::*` targets.
    pub verbosity: Verbosity,
    /// Whether rendered lines include the event target.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            with_target: true,
        }
    }
}

impl LogConfig {
    /// Builds a configuration from a `-v` count.
    #[must_use]
    pub fn from_verbose_level(level: u8) -> Self {
        Self {
            verbosity: Verbosity::from_level(level),
            ..Self::default()
        }
    }

    /// Filter directive selecting this configuration's events.
    ///
    /// Other crates stay at `warn` so a verbose negotiation trace is not
    /// drowned out by unrelated output.
    #[must_use]
    pub fn directive(&self) -> String {
        format!("warn,{ROOT_TARGET}={}", self.verbosity.as_str())
    }
}
