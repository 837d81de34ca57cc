//! # Key Derivation
//!
//! PBKDF2-HMAC-SHA256 with a fixed cost. The parameters are identical for
//! sealing and opening; changing any of them requires a new
//! [`EnvelopeScheme`](crate::EnvelopeScheme) variant.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2 iteration count for the v1 scheme.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Key material derived from a password and salt (256-bit).
///
/// Lives for one encrypt/decrypt call and is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    /// Run PBKDF2-HMAC-SHA256 over `password` and `salt`.
    pub fn derive(password: &str, salt: &[u8; SALT_LEN]) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}
