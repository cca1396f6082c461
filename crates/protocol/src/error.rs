use std::io;

use thiserror::Error;

use crate::request::RequestError;
use crate::version::ProtocolVersion;

/// SQLSTATE codes surfaced by connection establishment.
pub mod sql_state {
    /// The client could not establish a connection.
    pub const UNABLE_TO_CONNECT: &str = "08001";
    /// The server rejected the connection.
    pub const CONNECTION_REJECTED: &str = "08004";
    /// Password authentication failed.
    pub const INVALID_PASSWORD: &str = "28P01";
    /// The peer violated the frontend/backend protocol.
    pub const PROTOCOL_VIOLATION: &str = "08P01";
}

/// Hard failure reported by a protocol implementation.
///
/// Anything other than "this server does not speak my version" belongs here.
/// The dispatcher stops at the first `ConnectError` and returns it unchanged.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The transport could not be opened or broke during the handshake.
    #[error("could not connect to {host}:{port}: {source}")]
    Io {
        /// Host that was dialled.
        host: String,
        /// Port that was dialled.
        port: u16,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The server refused the supplied credentials.
    #[error("authentication failed for user \"{user}\": {reason}")]
    Authentication {
        /// User that attempted to authenticate.
        user: String,
        /// Server or client supplied explanation.
        reason: String,
    },
    /// The server answered the startup packet with an error response.
    #[error("server rejected connection: {message} (SQLSTATE {sql_state})")]
    Server {
        /// SQLSTATE reported by the server.
        sql_state: String,
        /// Primary message reported by the server.
        message: String,
    },
    /// The peer sent something the implementation could not interpret.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl ConnectError {
    /// Convenience constructor for [`ConnectError::Io`].
    pub fn io(host: impl Into<String>, port: u16, source: io::Error) -> Self {
        Self::Io {
            host: host.into(),
            port,
            source,
        }
    }

    /// SQLSTATE class describing the failure.
    #[must_use]
    pub fn sql_state(&self) -> &str {
        match self {
            Self::Io { .. } => sql_state::UNABLE_TO_CONNECT,
            Self::Authentication { .. } => sql_state::INVALID_PASSWORD,
            Self::Server { sql_state, .. } => sql_state.as_str(),
            Self::Protocol(_) => sql_state::PROTOCOL_VIOLATION,
        }
    }
}

/// Terminal error returned by [`negotiate`](crate::negotiate) and
/// [`Negotiator`](crate::Negotiator).
#[derive(Debug, Error)]
pub enum EstablishError {
    /// The request was rejected before any implementation ran.
    #[error("invalid connection request: {0}")]
    InvalidRequest(#[from] RequestError),
    /// An implementation failed for a reason other than a version mismatch.
    #[error("protocol {version} failed to connect: {source}")]
    Failed {
        /// Version whose implementation reported the failure.
        version: ProtocolVersion,
        /// The failure, exactly as the implementation reported it.
        #[source]
        source: ConnectError,
    },
    /// Every candidate was skipped or declined.
    #[error("{}", describe_exhaustion(.requested.as_ref(), .declined))]
    NoCompatibleProtocol {
        /// Version pinned through the `protocolVersion` property, if any.
        requested: Option<ProtocolVersion>,
        /// Versions whose implementation was invoked and declined, in trial order.
        declined: Vec<ProtocolVersion>,
    },
}

impl EstablishError {
    /// Returns the implementation failure carried by [`EstablishError::Failed`].
    #[must_use]
    pub const fn connect_error(&self) -> Option<&ConnectError> {
        match self {
            Self::Failed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Consumes the error, yielding the implementation failure if there was one.
    #[must_use]
    pub fn into_connect_error(self) -> Option<ConnectError> {
        match self {
            Self::Failed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Reports whether this is the exhaustion failure.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::NoCompatibleProtocol { .. })
    }

    /// Versions that declined before negotiation gave up.
    #[must_use]
    pub fn declined_versions(&self) -> Option<&[ProtocolVersion]> {
        match self {
            Self::NoCompatibleProtocol { declined, .. } => Some(declined.as_slice()),
            _ => None,
        }
    }

    /// Version that was pinned when negotiation gave up.
    #[must_use]
    pub const fn requested_version(&self) -> Option<&ProtocolVersion> {
        match self {
            Self::NoCompatibleProtocol { requested, .. } => requested.as_ref(),
            _ => None,
        }
    }

    /// Reports whether a pinned version was tried and declined by the server.
    ///
    /// Returns `false` when the pinned version matched no registry entry, in
    /// which case nothing was invoked.
    #[must_use]
    pub fn requested_version_declined(&self) -> bool {
        match self {
            Self::NoCompatibleProtocol {
                requested: Some(requested),
                declined,
            } => declined.contains(requested),
            _ => false,
        }
    }

    /// SQLSTATE class describing the failure.
    #[must_use]
    pub fn sql_state(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => sql_state::CONNECTION_REJECTED,
            Self::Failed { source, .. } => source.sql_state(),
            Self::NoCompatibleProtocol { .. } => sql_state::UNABLE_TO_CONNECT,
        }
    }
}

fn describe_exhaustion(requested: Option<&ProtocolVersion>, declined: &[ProtocolVersion]) -> String {
    let tried = if declined.is_empty() {
        "none".to_owned()
    } else {
        declined
            .iter()
            .map(ProtocolVersion::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    match requested {
        Some(requested) => format!(
            "no compatible protocol version available (requested {requested}; declined: {tried})"
        ),
        None => format!("no compatible protocol version available (declined: {tried})"),
    }
}

impl From<EstablishError> for io::Error {
    fn from(err: EstablishError) -> Self {
        let kind = match &err {
            EstablishError::InvalidRequest(_) => io::ErrorKind::InvalidInput,
            EstablishError::Failed {
                source: ConnectError::Io { source, .. },
                ..
            } => source.kind(),
            EstablishError::Failed { .. } => io::ErrorKind::ConnectionRefused,
            EstablishError::NoCompatibleProtocol { .. } => io::ErrorKind::Unsupported,
        };
        io::Error::new(kind, err)
    }
}
