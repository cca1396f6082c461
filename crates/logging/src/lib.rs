#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` carries the diagnostics plumbing shared by the workspace: the
//! `pgconnect::*` tracing targets and the macros that emit under them, a
//! serialisable [`LogConfig`], and helpers that install a `tracing-subscriber`
//! fmt subscriber filtered by that configuration.
//!
//! # Invariants
//!
//! - Library crates only emit events; installing a subscriber is left to the
//!   application (or to tests through [`try_init_test_tracing`]).
//! - Credentials are never passed to the macros. Callers log user, host and
//!   versions only.
//!
//! # Examples
//!
//! ```
//! use logging::{LogConfig, env_filter_with_override};
//!
//! let config = LogConfig::from_verbose_level(2);
//! assert_eq!(config.directive(), "warn,pgconnect=debug");
//!
//! let filter = env_filter_with_override(&config, None);
//! assert!(filter.to_string().contains("pgconnect=debug"));
//! ```

mod config;
mod levels;
mod tracing_bridge;
mod tracing_macros;

pub use config::LogConfig;
pub use levels::Verbosity;
pub use tracing_bridge::{
    LOG_ENV_VAR, TryInitError, env_filter, env_filter_with_override, try_init_test_tracing,
    try_init_tracing,
};
pub use tracing_macros::{NEGOTIATION_TARGET, REGISTRY_TARGET, ROOT_TARGET};
