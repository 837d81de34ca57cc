//! # Symmetric Sealing
//!
//! AES-256-GCM under a PBKDF2-derived key, empty associated data.
//!
//! ## Security Properties
//!
//! - Fresh 16-byte salt and 12-byte nonce per call, so a derived key never
//!   sees the same nonce twice
//! - Every opening failure collapses to `CodecError::DecryptionFailed`

use aes_gcm::{
    aead::{consts::U12, Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::{debug, warn};

use crate::envelope::{Envelope, EnvelopeScheme, IV_LEN};
use crate::kdf::{DerivedKey, SALT_LEN};
use crate::CodecError;

/// Seal `plaintext` under `password` using the operating system's CSPRNG.
///
/// # Errors
///
/// Returns `CodecError::CryptoEnvironmentUnavailable` if no secure
/// randomness can be obtained. Any password is accepted, including the empty
/// one; length policy is [`validate_password`](crate::validate_password).
pub fn encrypt(plaintext: &str, password: &str) -> Result<Envelope, CodecError> {
    encrypt_with_rng(plaintext, password, &mut OsRng)
}

/// Seal `plaintext` under `password`, drawing salt and nonce from `rng`.
///
/// # Errors
///
/// Same as [`encrypt`].
pub fn encrypt_with_rng<R>(
    plaintext: &str,
    password: &str,
    rng: &mut R,
) -> Result<Envelope, CodecError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    seal_bytes(plaintext.as_bytes(), password, rng)
}

/// Open `envelope` with `password` and return the UTF-8 plaintext.
///
/// # Errors
///
/// Returns `CodecError::DecryptionFailed` for a wrong password, a tampered
/// envelope, or plaintext that is not valid UTF-8.
pub fn decrypt(envelope: &Envelope, password: &str) -> Result<String, CodecError> {
    let bytes = match envelope.scheme() {
        EnvelopeScheme::Pbkdf2Sha256Aes256GcmV1 => open_v1(envelope, password)?,
    };

    String::from_utf8(bytes).map_err(|e| {
        // Tag verified but text is not UTF-8: an encoder or scheme mismatch,
        // not a wrong password. Surfaced here only; the caller sees one error.
        warn!(
            valid_up_to = e.utf8_error().valid_up_to(),
            "[cp-01] Authenticated plaintext is not valid UTF-8"
        );
        CodecError::DecryptionFailed
    })
}

fn seal_bytes<R>(plaintext: &[u8], password: &str, rng: &mut R) -> Result<Envelope, CodecError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    rng.try_fill_bytes(&mut salt)
        .and_then(|()| rng.try_fill_bytes(&mut iv))
        .map_err(|e| CodecError::CryptoEnvironmentUnavailable(e.to_string()))?;

    let key = DerivedKey::derive(password, &salt);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let ciphertext = cipher
        .encrypt(Nonce::<U12>::from_slice(&iv), plaintext)
        .map_err(|e| CodecError::CryptoEnvironmentUnavailable(e.to_string()))?;

    debug!(len = plaintext.len(), "[cp-01] Sealed envelope");

    Envelope::from_parts(salt, iv, ciphertext)
        .map_err(|e| CodecError::CryptoEnvironmentUnavailable(e.to_string()))
}

fn open_v1(envelope: &Envelope, password: &str) -> Result<Vec<u8>, CodecError> {
    let key = DerivedKey::derive(password, envelope.salt());
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher
        .decrypt(Nonce::<U12>::from_slice(envelope.iv()), envelope.ciphertext())
        .map_err(|_| {
            debug!("[cp-01] Authentication tag rejected");
            CodecError::DecryptionFailed
        })
}
