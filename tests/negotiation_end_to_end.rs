//! End-to-end negotiation against an in-memory server model.
//!
//! The fake server accepts a fixed set of protocol generations and one
//! password. Implementations translate its answers into attempt outcomes the
//! way a wire handshake would: an unsupported generation declines, a bad
//! password or an unreachable host fails hard.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use pgconnect::{
    AttemptOutcome, ConnectError, ConnectionRequest, EstablishError, LogConfig, Negotiator,
    PROTOCOL_VERSION_KEY, Properties, ProtocolImplementation, ProtocolVersion, VersionRegistry,
    sql_state, try_init_test_tracing,
};

#[derive(Debug)]
struct FakeServer {
    supported: Vec<ProtocolVersion>,
    password: &'static str,
    reachable: bool,
    handshakes: AtomicUsize,
}

impl FakeServer {
    fn new(supported: &[ProtocolVersion]) -> Arc<Self> {
        Arc::new(Self {
            supported: supported.to_vec(),
            password: "hunter2",
            reachable: true,
            handshakes: AtomicUsize::new(0),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            supported: vec![ProtocolVersion::V3, ProtocolVersion::V2],
            password: "hunter2",
            reachable: false,
            handshakes: AtomicUsize::new(0),
        })
    }

    fn handshakes(&self) -> usize {
        self.handshakes.load(Ordering::SeqCst)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Session {
    version: ProtocolVersion,
    user: String,
    database: String,
}

struct Handshake {
    version: ProtocolVersion,
    server: Arc<FakeServer>,
}

impl ProtocolImplementation for Handshake {
    type Connection = Session;

    fn attempt(&self, request: &ConnectionRequest) -> AttemptOutcome<Session> {
        self.server.handshakes.fetch_add(1, Ordering::SeqCst);

        if !self.server.reachable {
            return AttemptOutcome::Failed(ConnectError::io(
                request.host(),
                request.port(),
                io::Error::from(io::ErrorKind::ConnectionRefused),
            ));
        }
        if !self.server.supported.contains(&self.version) {
            return AttemptOutcome::Declined;
        }
        if request.password() != Some(self.server.password) {
            return AttemptOutcome::Failed(ConnectError::Authentication {
                user: request.user().to_owned(),
                reason: "password authentication failed".to_owned(),
            });
        }

        AttemptOutcome::Established(Session {
            version: self.version.clone(),
            user: request.user().to_owned(),
            database: request.database().to_owned(),
        })
    }
}

fn negotiator_for(server: &Arc<FakeServer>) -> Negotiator<Session> {
    Negotiator::from(VersionRegistry::standard(
        Handshake {
            version: ProtocolVersion::V3,
            server: Arc::clone(server),
        },
        Handshake {
            version: ProtocolVersion::V2,
            server: Arc::clone(server),
        },
    ))
}

fn credentials() -> Properties {
    Properties::new().with("password", "hunter2")
}

#[test]
fn modern_server_speaks_protocol_three() {
    let server = FakeServer::new(&[ProtocolVersion::V3, ProtocolVersion::V2]);
    let negotiator = negotiator_for(&server);

    let negotiated = negotiator
        .open("db.internal", 5432, "alice", "orders", credentials())
        .expect("v3 session");

    assert_eq!(negotiated.version(), &ProtocolVersion::V3);
    assert_eq!(
        negotiated.into_connection(),
        Session {
            version: ProtocolVersion::V3,
            user: "alice".to_owned(),
            database: "orders".to_owned(),
        }
    );
    assert_eq!(server.handshakes(), 1);
}

#[test]
fn legacy_server_falls_back_to_protocol_two() {
    let server = FakeServer::new(&[ProtocolVersion::V2]);
    let negotiator = negotiator_for(&server);

    let negotiated = negotiator
        .open("db.internal", 5432, "alice", "orders", credentials())
        .expect("v2 session");

    assert_eq!(negotiated.version(), &ProtocolVersion::V2);
    assert_eq!(server.handshakes(), 2);
}

#[test]
fn bad_password_is_not_retried_on_older_protocol() {
    let server = FakeServer::new(&[ProtocolVersion::V3, ProtocolVersion::V2]);
    let negotiator = negotiator_for(&server);

    let err = negotiator
        .open(
            "db.internal",
            5432,
            "alice",
            "orders",
            Properties::new().with("password", "wrong"),
        )
        .unwrap_err();

    assert_eq!(err.sql_state(), sql_state::INVALID_PASSWORD);
    assert!(matches!(
        err.connect_error(),
        Some(ConnectError::Authentication { user, .. }) if user == "alice"
    ));
    assert_eq!(server.handshakes(), 1);
}

#[test]
fn unreachable_host_surfaces_io_error() {
    let server = FakeServer::unreachable();
    let negotiator = negotiator_for(&server);

    let err = negotiator
        .open("db.internal", 6543, "alice", "orders", credentials())
        .unwrap_err();

    assert_eq!(err.sql_state(), sql_state::UNABLE_TO_CONNECT);
    assert!(err.to_string().starts_with("protocol 3 failed to connect"));
    let io_err = io::Error::from(err);
    assert_eq!(io_err.kind(), io::ErrorKind::ConnectionRefused);
    assert_eq!(server.handshakes(), 1);
}

#[test]
fn server_without_common_protocol_exhausts() {
    let server = FakeServer::new(&[ProtocolVersion::new("4")]);
    let negotiator = negotiator_for(&server);

    let err = negotiator
        .open("db.internal", 5432, "alice", "orders", credentials())
        .unwrap_err();

    assert!(err.is_exhausted());
    assert_eq!(
        err.declined_versions(),
        Some(&[ProtocolVersion::V3, ProtocolVersion::V2][..])
    );
    assert_eq!(err.sql_state(), sql_state::UNABLE_TO_CONNECT);
    assert_eq!(
        err.to_string(),
        "no compatible protocol version available (declined: 3, 2)"
    );
    assert_eq!(server.handshakes(), 2);
}

#[test]
fn pinned_legacy_protocol_skips_protocol_three() {
    let server = FakeServer::new(&[ProtocolVersion::V3, ProtocolVersion::V2]);
    let negotiator = negotiator_for(&server);

    let negotiated = negotiator
        .open(
            "db.internal",
            5432,
            "alice",
            "orders",
            credentials().with(PROTOCOL_VERSION_KEY, "2"),
        )
        .expect("pinned v2");

    assert_eq!(negotiated.version(), &ProtocolVersion::V2);
    assert_eq!(server.handshakes(), 1);
}

#[test]
fn pinned_protocol_the_server_lacks_exhausts_without_fallback() {
    let server = FakeServer::new(&[ProtocolVersion::V2]);
    let negotiator = negotiator_for(&server);

    let err = negotiator
        .open(
            "db.internal",
            5432,
            "alice",
            "orders",
            credentials().with_protocol_version(&ProtocolVersion::V3),
        )
        .unwrap_err();

    assert!(err.requested_version_declined());
    assert_eq!(err.requested_version(), Some(&ProtocolVersion::V3));
    assert_eq!(server.handshakes(), 1);
}

#[test]
fn missing_database_is_rejected_before_any_handshake() {
    let server = FakeServer::new(&[ProtocolVersion::V3]);
    let negotiator = negotiator_for(&server);

    let err = negotiator
        .open("db.internal", 5432, "alice", "", credentials())
        .unwrap_err();

    assert!(matches!(err, EstablishError::InvalidRequest(_)));
    assert_eq!(err.sql_state(), sql_state::CONNECTION_REJECTED);
    assert_eq!(server.handshakes(), 0);
}

#[test]
fn shared_negotiator_serves_concurrent_callers() {
    let server = FakeServer::new(&[ProtocolVersion::V2]);
    let negotiator = negotiator_for(&server);
    let workers = 8;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let negotiator = negotiator.clone();
                scope.spawn(move || {
                    let user = format!("worker{worker}");
                    negotiator
                        .open("db.internal", 5432, &user, "orders", credentials())
                        .map(|negotiated| negotiated.into_connection().user)
                })
            })
            .collect();

        for (worker, handle) in handles.into_iter().enumerate() {
            let user = handle.join().expect("worker thread").expect("v2 session");
            assert_eq!(user, format!("worker{worker}"));
        }
    });

    assert_eq!(server.handshakes(), workers * 2);
}

#[test]
fn negotiation_runs_under_an_installed_subscriber() {
    let _ = try_init_test_tracing(&LogConfig::from_verbose_level(3));
    let server = FakeServer::new(&[ProtocolVersion::V2]);
    let negotiator = negotiator_for(&server);

    let negotiated = negotiator
        .open("db.internal", 5432, "alice", "orders", credentials())
        .expect("v2 session");

    assert_eq!(negotiated.version(), &ProtocolVersion::V2);
}
