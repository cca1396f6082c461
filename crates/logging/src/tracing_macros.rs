//! crates/logging/src/tracing_macros.rs
//! Target-scoped wrappers around the tracing macros.
//!
//! Every negotiation event is emitted under a `pgconnect::*` target so a
//! single filter directive can select or silence them.

/// Prefix shared by every target emitted by this workspace.
pub const ROOT_TARGET: &str = "pgconnect";

/// Target for dispatcher decisions.
pub const NEGOTIATION_TARGET: &str = "pgconnect::negotiation";

/// Target for registry construction.
pub const REGISTRY_TARGET: &str = "pgconnect::registry";

/// Emit a negotiation decision (skip, decline, exhaustion).
///
/// # Example
/// ```ignore
/// trace_negotiate!(version = %entry.version(), "declined");
/// ```
#[macro_export]
macro_rules! trace_negotiate {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "pgconnect::negotiation", $($arg)*);
    };
}

/// Emit the entry into a single protocol attempt.
///
/// # Example
/// ```ignore
/// trace_attempt!(version = %entry.version(), "attempting");
/// ```
#[macro_export]
macro_rules! trace_attempt {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "pgconnect::negotiation", $($arg)*);
    };
}

/// Emit a negotiation milestone such as an established session.
#[macro_export]
macro_rules! info_negotiate {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "pgconnect::negotiation", $($arg)*);
    };
}

/// Emit a hard connection failure.
#[macro_export]
macro_rules! warn_negotiate {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: "pgconnect::negotiation", $($arg)*);
    };
}

/// Emit a registry construction event.
///
/// # Example
/// ```ignore
/// trace_registry!(versions = ?versions, "registry built");
/// ```
#[macro_export]
macro_rules! trace_registry {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "pgconnect::registry", $($arg)*);
    };
}
