#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Protocol-version negotiation for PostgreSQL-style connection setup.
//!
//! The crate holds two layers. A [`VersionRegistry`] is a frozen, ordered
//! table pairing each [`ProtocolVersion`] with the
//! [`ProtocolImplementation`] that speaks it, newest first. The dispatcher
//! ([`negotiate`] and its owning wrapper [`Negotiator`]) walks that table for
//! one [`ConnectionRequest`] and interprets each [`AttemptOutcome`]:
//!
//! - `Established` ends negotiation with the connection.
//! - `Declined` moves on to the next, older version.
//! - `Failed` ends negotiation with that error; older versions are not tried
//!   because the failure is not version specific.
//!
//! Wire handshakes themselves live in the implementations and are outside
//! this crate.
//!
//! # Examples
//!
//! Fall back from protocol 3 to protocol 2 when the server declines the
//! newer generation:
//!
//! ```
//! use protocol::{
//!     AttemptOutcome, ConnectionRequest, Negotiator, ProtocolVersion, VersionRegistry, from_fn,
//! };
//!
//! let registry = VersionRegistry::standard(
//!     from_fn(|_: &ConnectionRequest| AttemptOutcome::<&str>::Declined),
//!     from_fn(|_: &ConnectionRequest| AttemptOutcome::Established("v2 session")),
//! );
//! let negotiator = Negotiator::from(registry);
//!
//! let request = ConnectionRequest::new("localhost", 5432, "alice", "orders").unwrap();
//! let negotiated = negotiator.establish(&request).unwrap();
//!
//! assert_eq!(negotiated.version(), &ProtocolVersion::V2);
//! assert_eq!(negotiated.into_connection(), "v2 session");
//! ```
//!
//! Pinning a version through the `protocolVersion` property skips every other
//! entry:
//!
//! ```
//! use protocol::{
//!     AttemptOutcome, ConnectionRequest, Negotiator, Properties, ProtocolVersion,
//!     VersionRegistry, from_fn,
//! };
//!
//! let registry = VersionRegistry::standard(
//!     from_fn(|_: &ConnectionRequest| AttemptOutcome::Established(3)),
//!     from_fn(|_: &ConnectionRequest| AttemptOutcome::Established(2)),
//! );
//! let negotiator = Negotiator::from(registry);
//!
//! let properties = Properties::new().with_protocol_version(&ProtocolVersion::V2);
//! let negotiated = negotiator
//!     .open("localhost", 5432, "alice", "orders", properties)
//!     .unwrap();
//!
//! assert_eq!(negotiated.into_connection(), 2);
//! ```

mod attempt;
mod error;
mod negotiation;
mod properties;
mod registry;
mod request;
mod version;

pub use attempt::{AttemptOutcome, FromFn, ProtocolImplementation, from_fn};
pub use error::{ConnectError, EstablishError, sql_state};
pub use negotiation::{Negotiated, Negotiator, negotiate};
pub use properties::{Iter as PropertiesIter, Properties};
pub use registry::{RegistryBuilder, RegistryEntry, RegistryError, VersionRegistry};
pub use request::{ConnectionRequest, RequestError};
pub use version::{PASSWORD_KEY, PROTOCOL_VERSION_KEY, ProtocolVersion, STANDARD_PROTOCOLS};
