//! # CP-01 Envelope Codec
//!
//! Password-sealed message envelopes.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Leaf component, no I/O
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `kdf` | PBKDF2-HMAC-SHA256, 100,000 iterations | Password to 256-bit key |
//! | `symmetric` | AES-256-GCM, empty AAD | Sealing and opening |
//! | `envelope` | JSON byte arrays | Storage/transport format |
//! | `password` | Length policy | Sender-side check |
//!
//! ## Security Properties
//!
//! - Salt (16 bytes) and nonce (12 bytes) are fresh per call from a CSPRNG
//! - Derived keys are never serialized and are zeroized on drop
//! - Wrong password, tampering and malformed plaintext are indistinguishable
//!   to the caller (`CodecError::DecryptionFailed`)
//! - Passwords and keys are never logged
//!
//! ## Usage Example
//!
//! ```ignore
//! use cp_01_envelope_codec::{decrypt, encrypt, Envelope};
//!
//! let envelope = encrypt("meet at noon", "correct horse battery")?;
//! let json = envelope.to_json()?;
//!
//! let stored = Envelope::from_json(&json)?;
//! assert_eq!(decrypt(&stored, "correct horse battery")?, "meet at noon");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod envelope;
pub mod errors;
pub mod kdf;
pub mod password;
pub mod symmetric;

// Re-exports
pub use envelope::{Envelope, EnvelopeScheme, IV_LEN, TAG_LEN};
pub use errors::{CodecError, EnvelopeError};
pub use kdf::{DerivedKey, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
pub use password::{validate_password, MIN_PASSWORD_CHARS};
pub use symmetric::{decrypt, encrypt, encrypt_with_rng};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
