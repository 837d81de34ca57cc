//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Storage**: `ContentIdentifier`, `Endpoint`
//! - **Ledger**: `Identity`, `InboxEntry`

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{EndpointError, IdentifierError, IdentityError};

// =============================================================================
// CLUSTER A: STORAGE
// =============================================================================

/// Opaque name of an envelope in content-addressed storage.
///
/// Produced by the upload collaborator, recorded on the ledger, and handed to
/// the gateway fetcher. The only structure assumed is that it can be appended
/// to a gateway base URL, so characters that would alter the URL (whitespace,
/// control characters, `?`, `#`) are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentIdentifier(String);

impl ContentIdentifier {
    /// Validate and wrap an identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if let Some((position, ch)) = value
            .char_indices()
            .find(|(_, c)| c.is_whitespace() || c.is_control() || *c == '?' || *c == '#')
        {
            return Err(IdentifierError::ForbiddenCharacter { ch, position });
        }
        Ok(Self(value))
    }

    /// Borrow the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContentIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ContentIdentifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentIdentifier> for String {
    fn from(cid: ContentIdentifier) -> Self {
        cid.0
    }
}

/// Base retrieval location of a gateway, e.g. `https://ipfs.io/ipfs/`.
///
/// Ordering of endpoints in a list encodes preference; the endpoint itself
/// carries no priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint(String);

impl Endpoint {
    /// Validate and wrap a gateway base URL.
    pub fn new(base: impl Into<String>) -> Result<Self, EndpointError> {
        let base = base.into();
        let trimmed = base.trim();
        if trimmed.is_empty() {
            return Err(EndpointError::Empty);
        }
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(EndpointError::UnsupportedScheme(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The base URL as configured.
    pub fn base(&self) -> &str {
        &self.0
    }

    /// Compose the retrieval URL for `cid`, with exactly one `/` between the
    /// base and the identifier.
    pub fn resolve(&self, cid: &ContentIdentifier) -> String {
        let base = self.0.trim_end_matches('/');
        let id = cid.as_str().trim_start_matches('/');
        format!("{base}/{id}")
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Endpoint {
    type Error = EndpointError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.0
    }
}

// =============================================================================
// CLUSTER B: LEDGER
// =============================================================================

/// Number of hex digits in a ledger account identity.
pub const IDENTITY_HEX_LEN: usize = 40;

/// A ledger account, `0x` followed by 40 hex digits.
///
/// The spelling as given (checksummed or not) is preserved; comparison and
/// hashing ignore ASCII case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Validate and wrap an identity.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let value = value.into();
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .ok_or(IdentityError::MissingPrefix)?;
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(IdentityError::InvalidCharacter(bad));
        }
        if digits.len() != IDENTITY_HEX_LEN {
            return Err(IdentityError::InvalidLength(digits.len()));
        }
        Ok(Self(value))
    }

    /// Borrow the identity string as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

/// One message reference as listed by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxEntry {
    /// Account that recorded the message.
    pub sender: Identity,
    /// Unix seconds at which the ledger recorded it.
    pub timestamp: u64,
    /// Where the envelope is stored.
    pub cid: ContentIdentifier,
}
