//! Protocol version identifiers.
//!
//! [`ProtocolVersion`] is an opaque token; the dispatcher never interprets it
//! beyond equality. The well-known PostgreSQL generations are exposed as
//! constants and listed newest-first in [`STANDARD_PROTOCOLS`].

mod constants;
mod protocol_version;

pub use constants::{PASSWORD_KEY, PROTOCOL_VERSION_KEY, STANDARD_PROTOCOLS};
pub use protocol_version::ProtocolVersion;
