//! Ordered-fallback connection establishment.
//!
//! [`negotiate`] walks a [`VersionRegistry`] newest-first and stops at the
//! first implementation that either establishes a session or fails hard.
//! Implementations that decline are skipped over; when none remain the
//! caller receives [`EstablishError::NoCompatibleProtocol`].
//!
//! A `protocolVersion` property pins negotiation to a single registry entry.
//! Every other entry is skipped without being invoked.

use std::fmt;
use std::sync::Arc;

use logging::{info_negotiate, trace_attempt, trace_negotiate, warn_negotiate};

use crate::attempt::AttemptOutcome;
use crate::error::EstablishError;
use crate::properties::Properties;
use crate::registry::VersionRegistry;
use crate::request::ConnectionRequest;
use crate::version::ProtocolVersion;

/// A connection produced by negotiation, tagged with the version that opened it.
#[derive(Debug)]
pub struct Negotiated<C> {
    version: ProtocolVersion,
    connection: C,
}

impl<C> Negotiated<C> {
    /// Version whose implementation established the session.
    #[must_use]
    pub const fn version(&self) -> &ProtocolVersion {
        &self.version
    }

    /// Borrows the live connection.
    #[must_use]
    pub const fn connection(&self) -> &C {
        &self.connection
    }

    /// Takes ownership of the live connection.
    #[must_use]
    pub fn into_connection(self) -> C {
        self.connection
    }

    /// Splits into version and connection.
    #[must_use]
    pub fn into_parts(self) -> (ProtocolVersion, C) {
        (self.version, self.connection)
    }
}

/// Establishes a connection for `request` using the entries of `registry`.
///
/// Each entry is invoked at most once and strictly one after another.
/// The first [`AttemptOutcome::Established`] wins. The first
/// [`AttemptOutcome::Failed`] aborts negotiation and is returned unchanged
/// inside [`EstablishError::Failed`].
pub fn negotiate<C>(
    registry: &VersionRegistry<C>,
    request: &ConnectionRequest,
) -> Result<Negotiated<C>, EstablishError> {
    let requested = request.requested_version();
    let mut declined = Vec::new();

    trace_negotiate!(
        host = request.host(),
        port = request.port(),
        user = request.user(),
        database = request.database(),
        requested = ?requested.as_ref().map(ProtocolVersion::as_str),
        candidates = registry.len(),
        "negotiation started"
    );

    for entry in registry {
        let version = entry.version();

        if let Some(requested) = &requested
            && requested != version
        {
            trace_negotiate!(%version, %requested, "skipped: not the requested version");
            continue;
        }

        trace_attempt!(%version, "attempting");
        match entry.attempt(request) {
            AttemptOutcome::Established(connection) => {
                info_negotiate!(
                    %version,
                    host = request.host(),
                    port = request.port(),
                    declined = declined.len(),
                    "connection established"
                );
                return Ok(Negotiated {
                    version: version.clone(),
                    connection,
                });
            }
            AttemptOutcome::Declined => {
                trace_negotiate!(%version, "declined by server");
                declined.push(version.clone());
            }
            AttemptOutcome::Failed(source) => {
                warn_negotiate!(%version, error = %source, "connection failed");
                return Err(EstablishError::Failed {
                    version: version.clone(),
                    source,
                });
            }
        }
    }

    trace_negotiate!(
        requested = ?requested.as_ref().map(ProtocolVersion::as_str),
        declined = declined.len(),
        "no compatible protocol version"
    );
    Err(EstablishError::NoCompatibleProtocol {
        requested,
        declined,
    })
}

/// Owns a shared registry and runs negotiations against it.
///
/// Cloning is cheap; clones share the same registry. Many threads may call
/// [`establish`](Self::establish) concurrently.
pub struct Negotiator<C> {
    registry: Arc<VersionRegistry<C>>,
}

impl<C> Negotiator<C> {
    /// Creates a negotiator over `registry`.
    #[must_use]
    pub const fn new(registry: Arc<VersionRegistry<C>>) -> Self {
        Self { registry }
    }

    /// The registry consulted by every negotiation.
    #[must_use]
    pub fn registry(&self) -> &VersionRegistry<C> {
        &self.registry
    }

    /// Establishes a connection for an already validated request.
    pub fn establish(&self, request: &ConnectionRequest) -> Result<Negotiated<C>, EstablishError> {
        negotiate(&self.registry, request)
    }

    /// Validates the arguments into a [`ConnectionRequest`] and establishes it.
    ///
    /// Fails with [`EstablishError::InvalidRequest`] before any
    /// implementation runs when `user` or `database` is empty.
    pub fn open(
        &self,
        host: &str,
        port: u16,
        user: &str,
        database: &str,
        properties: Properties,
    ) -> Result<Negotiated<C>, EstablishError> {
        let request = ConnectionRequest::with_properties(host, port, user, database, properties)?;
        self.establish(&request)
    }
}

impl<C> Clone for Negotiator<C> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<C> From<VersionRegistry<C>> for Negotiator<C> {
    fn from(registry: VersionRegistry<C>) -> Self {
        Self::new(Arc::new(registry))
    }
}

impl<C> fmt::Debug for Negotiator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Negotiator")
            .field("registry", &*self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests;
