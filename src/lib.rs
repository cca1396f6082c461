#![deny(unsafe_code)]
#![deny(missing_docs)]

//! `pgconnect` ties the workspace together: protocol-version negotiation
//! from [`protocol`] and the diagnostics setup from [`logging`].
//!
//! Applications normally build a [`VersionRegistry`] once at startup, wrap it
//! in a [`Negotiator`], and call [`Negotiator::open`] for every connection.
//! Installing a subscriber is optional; without one the negotiation events
//! are discarded.
//!
//! ```
//! use pgconnect::{AttemptOutcome, ConnectionRequest, Negotiator, VersionRegistry, from_fn};
//!
//! let negotiator = Negotiator::from(VersionRegistry::standard(
//!     from_fn(|request: &ConnectionRequest| {
//!         AttemptOutcome::Established(format!("{}@{}", request.user(), request.host()))
//!     }),
//!     from_fn(|_: &ConnectionRequest| AttemptOutcome::Declined),
//! ));
//!
//! let negotiated = negotiator
//!     .open("db.internal", 5432, "alice", "orders", Default::default())
//!     .unwrap();
//! assert_eq!(negotiated.connection(), "alice@db.internal");
//! ```

pub use logging::{
    LOG_ENV_VAR, LogConfig, TryInitError, Verbosity, env_filter, env_filter_with_override,
    try_init_test_tracing, try_init_tracing,
};
pub use protocol::{
    AttemptOutcome, ConnectError, ConnectionRequest, EstablishError, FromFn, Negotiated,
    Negotiator, PASSWORD_KEY, PROTOCOL_VERSION_KEY, Properties, PropertiesIter,
    ProtocolImplementation, ProtocolVersion, RegistryBuilder, RegistryEntry, RegistryError,
    RequestError, STANDARD_PROTOCOLS, VersionRegistry, from_fn, negotiate, sql_state,
};

pub use logging;
pub use protocol;
