//! Codec error types.

use thiserror::Error;

/// Errors from sealing or opening an envelope.
#[derive(Debug, Error)]
pub enum CodecError {
    /// No secure randomness or no working AEAD primitive. Not retryable.
    #[error("Crypto environment unavailable: {0}")]
    CryptoEnvironmentUnavailable(String),

    /// Wrong password, tampered envelope, or an envelope from another scheme.
    ///
    /// Deliberately carries no detail.
    #[error("Decryption failed. Check your password.")]
    DecryptionFailed,

    /// Password shorter than the sender-side policy allows.
    #[error("Password must be at least {min} characters, got {actual}")]
    WeakPassword {
        /// Minimum length in UTF-16 code units
        min: usize,
        /// Length supplied, in UTF-16 code units
        actual: usize,
    },
}

/// Errors from reading or writing the envelope wire format.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Body is not a JSON object with `iv`, `salt` and `ciphertext` byte arrays.
    #[error("Malformed envelope: {0}")]
    Malformed(String),

    /// A fixed-size field has the wrong length.
    #[error("Invalid {field} length: expected {expected}, got {actual}")]
    InvalidFieldLength {
        /// Field name as it appears on the wire
        field: &'static str,
        /// Required length in bytes
        expected: usize,
        /// Length found
        actual: usize,
    },

    /// Ciphertext cannot even hold the authentication tag.
    #[error("Ciphertext too short: {len} bytes, tag alone is {tag_len}")]
    CiphertextTooShort {
        /// Ciphertext length found
        len: usize,
        /// AEAD tag length
        tag_len: usize,
    },

    /// `scheme` names an algorithm suite this build does not know.
    #[error("Unsupported envelope scheme: {0}")]
    UnsupportedScheme(String),

    /// Encoding to JSON failed.
    #[error("Envelope serialization failed: {0}")]
    Serialization(String),
}
