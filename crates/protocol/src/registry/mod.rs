//! Ordered table of protocol versions and their implementations.
//!
//! Registration order is negotiation priority: the first entry is tried
//! first. The table is validated and frozen by [`RegistryBuilder::build`];
//! nothing is inserted, removed or reordered afterwards.

use std::fmt;

use logging::trace_registry;
use thiserror::Error;

use crate::attempt::{AttemptOutcome, ProtocolImplementation};
use crate::request::ConnectionRequest;
use crate::version::ProtocolVersion;

type BoxedImplementation<C> = Box<dyn ProtocolImplementation<Connection = C>>;

/// Errors raised while freezing a registry.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RegistryError {
    /// The same version was registered twice.
    #[error("protocol version {0} is registered more than once")]
    DuplicateVersion(ProtocolVersion),
    /// A version with an empty token was registered.
    #[error("protocol version at position {position} is blank")]
    BlankVersion {
        /// Zero-based registration position of the blank entry.
        position: usize,
    },
}

/// One protocol version paired with the implementation that speaks it.
pub struct RegistryEntry<C> {
    version: ProtocolVersion,
    implementation: BoxedImplementation<C>,
}

impl<C> RegistryEntry<C> {
    /// Version served by this entry.
    #[must_use]
    pub const fn version(&self) -> &ProtocolVersion {
        &self.version
    }

    /// Implementation serving this entry.
    #[must_use]
    pub fn implementation(&self) -> &dyn ProtocolImplementation<Connection = C> {
        self.implementation.as_ref()
    }

    /// Invokes the implementation once.
    pub fn attempt(&self, request: &ConnectionRequest) -> AttemptOutcome<C> {
        self.implementation.attempt(request)
    }
}

impl<C> fmt::Debug for RegistryEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Immutable, ordered set of supported protocol versions.
///
/// Shared across threads behind an `Arc`; every accessor takes `&self`.
pub struct VersionRegistry<C> {
    entries: Vec<RegistryEntry<C>>,
}

impl<C> VersionRegistry<C> {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder<C> {
        RegistryBuilder::new()
    }

    /// Builds the canonical PostgreSQL table: protocol 3, then protocol 2.
    pub fn standard<V3, V2>(v3: V3, v2: V2) -> Self
    where
        V3: ProtocolImplementation<Connection = C> + 'static,
        V2: ProtocolImplementation<Connection = C> + 'static,
    {
        let entries = vec![
            RegistryEntry {
                version: ProtocolVersion::V3,
                implementation: Box::new(v3),
            },
            RegistryEntry {
                version: ProtocolVersion::V2,
                implementation: Box::new(v2),
            },
        ];
        trace_registry!(versions = "3, 2", "standard registry built");
        Self { entries }
    }

    /// Every entry, most preferred first.
    #[must_use]
    pub fn entries(&self) -> &[RegistryEntry<C>] {
        &self.entries
    }

    /// Iterates over entries in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, RegistryEntry<C>> {
        self.entries.iter()
    }

    /// Iterates over the registered versions in priority order.
    pub fn versions(&self) -> impl ExactSizeIterator<Item = &ProtocolVersion> + '_ {
        self.entries.iter().map(RegistryEntry::version)
    }

    /// Looks up the entry for `version`.
    #[must_use]
    pub fn find(&self, version: &ProtocolVersion) -> Option<&RegistryEntry<C>> {
        self.entries.iter().find(|entry| entry.version == *version)
    }

    /// Reports whether `version` is registered.
    #[must_use]
    pub fn contains(&self, version: &ProtocolVersion) -> bool {
        self.find(version).is_some()
    }

    /// Number of registered versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no version is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, C> IntoIterator for &'a VersionRegistry<C> {
    type Item = &'a RegistryEntry<C>;
    type IntoIter = std::slice::Iter<'a, RegistryEntry<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<C> fmt::Debug for VersionRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionRegistry")
            .field("versions", &self.versions().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects entries in registration order until [`build`](Self::build).
pub struct RegistryBuilder<C> {
    entries: Vec<RegistryEntry<C>>,
}

impl<C> RegistryBuilder<C> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends `version` after every entry registered so far.
    #[must_use]
    pub fn register<P>(mut self, version: ProtocolVersion, implementation: P) -> Self
    where
        P: ProtocolImplementation<Connection = C> + 'static,
    {
        self.entries.push(RegistryEntry {
            version,
            implementation: Box::new(implementation),
        });
        self
    }

    /// Validates the table and freezes its order.
    pub fn build(self) -> Result<VersionRegistry<C>, RegistryError> {
        for (position, entry) in self.entries.iter().enumerate() {
            if entry.version.is_blank() {
                return Err(RegistryError::BlankVersion { position });
            }
            if self.entries[..position]
                .iter()
                .any(|earlier| earlier.version == entry.version)
            {
                return Err(RegistryError::DuplicateVersion(entry.version.clone()));
            }
        }

        let registry = VersionRegistry {
            entries: self.entries,
        };
        let versions: Vec<&ProtocolVersion> = registry.versions().collect();
        trace_registry!(versions = ?versions, "registry built");
        Ok(registry)
    }
}

impl<C> fmt::Debug for RegistryBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("pending", &self.entries.len())
            .finish()
    }
}
