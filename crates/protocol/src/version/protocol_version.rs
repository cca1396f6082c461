use std::borrow::{Borrow, Cow};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Opaque token naming one generation of the frontend/backend protocol.
///
/// Tokens compare by exact string equality. No trimming or case folding is
/// applied, so `"3"` and `" 3"` are different versions. This matches how a
/// requested version supplied through [`Properties`](crate::Properties) is
/// matched against registry entries.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ProtocolVersion(Cow<'static, str>);

impl ProtocolVersion {
    /// Protocol 3.0, spoken by PostgreSQL 7.4 and later.
    pub const V3: Self = Self::from_static("3");

    /// Protocol 2.0, spoken by servers older than PostgreSQL 7.4.
    pub const V2: Self = Self::from_static("2");

    /// Creates a version from a string literal without allocating.
    #[must_use]
    pub const fn from_static(token: &'static str) -> Self {
        Self(Cow::Borrowed(token))
    }

    /// Creates a version from an owned or borrowed token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Cow::Owned(token.into()))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reports whether the token is empty.
    ///
    /// Blank tokens are accepted as requested versions (they simply match
    /// nothing) but cannot be registered.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ProtocolVersion {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for ProtocolVersion {
    fn from(token: String) -> Self {
        Self(Cow::Owned(token))
    }
}

impl AsRef<str> for ProtocolVersion {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for ProtocolVersion {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ProtocolVersion {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ProtocolVersion {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
