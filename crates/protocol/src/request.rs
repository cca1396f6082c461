//! Connection requests handed to the dispatcher.

use thiserror::Error;

use crate::properties::Properties;
use crate::version::ProtocolVersion;

/// Validation failures raised while building a [`ConnectionRequest`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum RequestError {
    /// The user name was empty.
    #[error("connection request is missing a user name")]
    MissingUser,
    /// The database name was empty.
    #[error("connection request is missing a database name")]
    MissingDatabase,
}

/// Target and credentials for one connection attempt.
///
/// Immutable once built. The dispatcher and every protocol implementation
/// only ever see a shared borrow.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectionRequest {
    host: String,
    port: u16,
    user: String,
    database: String,
    properties: Properties,
}

impl ConnectionRequest {
    /// Builds a request with no extra properties.
    ///
    /// `user` and `database` must be non-empty.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        database: impl Into<String>,
    ) -> Result<Self, RequestError> {
        Self::with_properties(host, port, user, database, Properties::new())
    }

    /// Builds a request carrying `properties`.
    pub fn with_properties(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        database: impl Into<String>,
        properties: Properties,
    ) -> Result<Self, RequestError> {
        let user = user.into();
        if user.is_empty() {
            return Err(RequestError::MissingUser);
        }

        let database = database.into();
        if database.is_empty() {
            return Err(RequestError::MissingDatabase);
        }

        Ok(Self {
            host: host.into(),
            port,
            user,
            database,
            properties,
        })
    }

    /// Host name or address of the server.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port of the server.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// User to authenticate as.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Database to open.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Extra properties forwarded to protocol implementations.
    #[must_use]
    pub const fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Shorthand for `self.properties().password()`.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.properties.password()
    }

    /// Shorthand for `self.properties().protocol_version()`.
    #[must_use]
    pub fn requested_version(&self) -> Option<ProtocolVersion> {
        self.properties.protocol_version()
    }
}
