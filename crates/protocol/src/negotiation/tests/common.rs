use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::attempt::{AttemptOutcome, ProtocolImplementation};
use crate::error::ConnectError;
use crate::properties::Properties;
use crate::registry::VersionRegistry;
use crate::request::ConnectionRequest;
use crate::version::{PROTOCOL_VERSION_KEY, ProtocolVersion};

/// What a scripted implementation does when invoked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Behavior {
    Accept,
    Decline,
    Fail,
}

/// Connection handed out by [`Scripted`] implementations.
#[derive(Debug, Eq, PartialEq)]
pub(super) struct FakeConnection {
    pub(super) version: ProtocolVersion,
    pub(super) user: String,
}

/// Implementation that follows a fixed behaviour and counts its invocations.
pub(super) struct Scripted {
    version: ProtocolVersion,
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

impl ProtocolImplementation for Scripted {
    type Connection = FakeConnection;

    fn attempt(&self, request: &ConnectionRequest) -> AttemptOutcome<FakeConnection> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Accept => AttemptOutcome::Established(FakeConnection {
                version: self.version.clone(),
                user: request.user().to_owned(),
            }),
            Behavior::Decline => AttemptOutcome::Declined,
            Behavior::Fail => AttemptOutcome::Failed(rejection(&self.version, request)),
        }
    }
}

/// The failure a [`Behavior::Fail`] implementation reports.
pub(super) fn rejection(version: &ProtocolVersion, request: &ConnectionRequest) -> ConnectError {
    ConnectError::Authentication {
        user: request.user().to_owned(),
        reason: format!("rejected by protocol {version}"),
    }
}

/// Registry built from a script plus a call counter per entry.
pub(super) struct Harness {
    pub(super) registry: VersionRegistry<FakeConnection>,
    counters: Vec<(ProtocolVersion, Arc<AtomicUsize>)>,
}

impl Harness {
    pub(super) fn new(script: &[(&str, Behavior)]) -> Self {
        let mut builder = VersionRegistry::builder();
        let mut counters = Vec::with_capacity(script.len());

        for &(token, behavior) in script {
            let version = ProtocolVersion::new(token);
            let calls = Arc::new(AtomicUsize::new(0));
            counters.push((version.clone(), Arc::clone(&calls)));
            builder = builder.register(
                version.clone(),
                Scripted {
                    version,
                    behavior,
                    calls,
                },
            );
        }

        Self {
            registry: builder.build().expect("scripted versions are distinct"),
            counters,
        }
    }

    pub(super) fn calls(&self, token: &str) -> usize {
        self.counters
            .iter()
            .find(|(version, _)| version == &token)
            .map_or(0, |(_, calls)| calls.load(Ordering::SeqCst))
    }

    pub(super) fn calls_in_order(&self) -> Vec<usize> {
        self.counters
            .iter()
            .map(|(_, calls)| calls.load(Ordering::SeqCst))
            .collect()
    }

    pub(super) fn total_calls(&self) -> usize {
        self.calls_in_order().iter().sum()
    }

    pub(super) fn reset(&self) {
        for (_, calls) in &self.counters {
            calls.store(0, Ordering::SeqCst);
        }
    }
}

pub(super) fn request() -> ConnectionRequest {
    request_with(Properties::new())
}

pub(super) fn pinned_request(token: &str) -> ConnectionRequest {
    request_with(Properties::new().with(PROTOCOL_VERSION_KEY, token))
}

pub(super) fn request_with(properties: Properties) -> ConnectionRequest {
    ConnectionRequest::with_properties("db.internal", 5432, "alice", "orders", properties)
        .expect("valid request")
}
