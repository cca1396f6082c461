//! crates/logging/src/levels.rs
//! Verbosity levels and their mapping onto tracing filters.

use tracing::level_filters::LevelFilter;

/// How much negotiation detail is emitted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verbosity {
    /// Warnings only: hard connection failures.
    Quiet,
    /// Successful negotiations and failures.
    #[default]
    Info,
    /// Every skip, decline and registry decision.
    Debug,
    /// Individual attempt entry and exit.
    Trace,
}

impl Verbosity {
    /// Maps a `-v` count onto a verbosity. Counts above 3 saturate.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Quiet,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Filter directive level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Equivalent tracing level filter.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}
