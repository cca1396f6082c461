//! The capability every protocol-version handler exposes to the dispatcher.

use std::fmt;
use std::marker::PhantomData;

use crate::error::ConnectError;
use crate::request::ConnectionRequest;

/// Result of a single connection attempt with one protocol version.
#[must_use = "an attempt outcome decides whether negotiation continues"]
pub enum AttemptOutcome<C> {
    /// A session was established; negotiation stops here.
    Established(C),
    /// The server does not speak this version; the next candidate is tried.
    Declined,
    /// A version-independent failure; negotiation aborts with this error.
    Failed(ConnectError),
}

impl<C> AttemptOutcome<C> {
    /// Adapts the nullable convention where `Ok(None)` means "declined".
    pub fn from_nullable(result: Result<Option<C>, ConnectError>) -> Self {
        match result {
            Ok(Some(connection)) => Self::Established(connection),
            Ok(None) => Self::Declined,
            Err(err) => Self::Failed(err),
        }
    }

    /// Reports whether the attempt produced a connection.
    #[must_use]
    pub const fn is_established(&self) -> bool {
        matches!(self, Self::Established(_))
    }

    /// Reports whether the server declined the version.
    #[must_use]
    pub const fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }

    /// Reports whether the attempt failed hard.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Short label used in diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Established(_) => "established",
            Self::Declined => "declined",
            Self::Failed(_) => "failed",
        }
    }
}

impl<C> From<Result<Option<C>, ConnectError>> for AttemptOutcome<C> {
    fn from(result: Result<Option<C>, ConnectError>) -> Self {
        Self::from_nullable(result)
    }
}

impl<C> fmt::Debug for AttemptOutcome<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Established(_) => f.write_str("Established(..)"),
            Self::Declined => f.write_str("Declined"),
            Self::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

/// A handler able to open a session for one protocol version.
///
/// One instance serves every request, possibly from several threads at
/// once, so implementations must not keep per-request mutable state.
pub trait ProtocolImplementation: Send + Sync {
    /// Live connection handed back on success.
    type Connection;

    /// Attempts to open a session for `request`.
    ///
    /// Return [`AttemptOutcome::Declined`] only when the server does not
    /// support this protocol version. Network, authentication and protocol
    /// errors must be reported as [`AttemptOutcome::Failed`].
    fn attempt(&self, request: &ConnectionRequest) -> AttemptOutcome<Self::Connection>;
}

impl<P> ProtocolImplementation for Box<P>
where
    P: ProtocolImplementation + ?Sized,
{
    type Connection = P::Connection;

    fn attempt(&self, request: &ConnectionRequest) -> AttemptOutcome<Self::Connection> {
        (**self).attempt(request)
    }
}

impl<P> ProtocolImplementation for std::sync::Arc<P>
where
    P: ProtocolImplementation + ?Sized,
{
    type Connection = P::Connection;

    fn attempt(&self, request: &ConnectionRequest) -> AttemptOutcome<Self::Connection> {
        (**self).attempt(request)
    }
}

/// Protocol implementation backed by a closure. Created by [`from_fn`].
pub struct FromFn<F, C> {
    attempt: F,
    _connection: PhantomData<fn() -> C>,
}

/// Wraps `attempt` so it can be registered as a protocol implementation.
pub fn from_fn<F, C>(attempt: F) -> FromFn<F, C>
where
    F: Fn(&ConnectionRequest) -> AttemptOutcome<C> + Send + Sync,
{
    FromFn {
        attempt,
        _connection: PhantomData,
    }
}

impl<F, C> ProtocolImplementation for FromFn<F, C>
where
    F: Fn(&ConnectionRequest) -> AttemptOutcome<C> + Send + Sync,
{
    type Connection = C;

    fn attempt(&self, request: &ConnectionRequest) -> AttemptOutcome<C> {
        (self.attempt)(request)
    }
}

impl<F, C> fmt::Debug for FromFn<F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}
