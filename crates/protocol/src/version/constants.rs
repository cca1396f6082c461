//! Well-known protocol generations and their canonical preference order.

use super::ProtocolVersion;

/// Protocol generations understood by PostgreSQL servers, newest first.
///
/// [`VersionRegistry::standard`](crate::VersionRegistry::standard) registers
/// implementations in exactly this order.
pub const STANDARD_PROTOCOLS: [ProtocolVersion; 2] = [ProtocolVersion::V3, ProtocolVersion::V2];

/// Property key carrying the protocol version a caller wants to pin.
pub const PROTOCOL_VERSION_KEY: &str = "protocolVersion";

/// Property key carrying the password used during authentication.
pub const PASSWORD_KEY: &str = "password";
