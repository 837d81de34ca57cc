//! # Error Types
//!
//! Validation errors for the shared value types.

use thiserror::Error;

/// A content identifier could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Identifier is the empty string.
    #[error("Content identifier is empty")]
    Empty,

    /// Identifier contains a character that would change the retrieval URL.
    #[error("Content identifier contains forbidden character {ch:?} at byte {position}")]
    ForbiddenCharacter {
        /// Offending character
        ch: char,
        /// Byte offset in the identifier
        position: usize,
    },
}

/// A gateway endpoint could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// Endpoint is the empty string.
    #[error("Gateway endpoint is empty")]
    Empty,

    /// Only http and https gateways are supported.
    #[error("Unsupported gateway scheme in {0} (expected http:// or https://)")]
    UnsupportedScheme(String),
}

/// A ledger identity could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Identity must start with `0x`.
    #[error("Identity must start with 0x")]
    MissingPrefix,

    /// Identity must carry exactly 40 hex digits after the prefix.
    #[error("Identity must have 40 hex digits, got {0}")]
    InvalidLength(usize),

    /// Non-hex character after the prefix.
    #[error("Identity contains non-hex character {0:?}")]
    InvalidCharacter(char),
}
