//! # Envelope
//!
//! The persisted unit of ciphertext and its JSON wire format.
//!
//! ## Wire Format
//!
//! ```text
//! {"iv":[12 ints],"salt":[16 ints],"ciphertext":[n + 16 ints]}
//! ```
//!
//! Every byte is a JSON integer 0-255. An optional `scheme` string may be
//! present; absence means [`EnvelopeScheme::Pbkdf2Sha256Aes256GcmV1`], and
//! v1 envelopes are always written without it so existing readers see the
//! three-field object they expect.

use serde::{Deserialize, Serialize};

use crate::errors::EnvelopeError;
use crate::kdf::SALT_LEN;

/// AES-GCM nonce length in bytes.
pub const IV_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Algorithm suite an envelope was sealed with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EnvelopeScheme {
    /// PBKDF2-HMAC-SHA256 (100,000 iterations) + AES-256-GCM, empty AAD.
    #[default]
    Pbkdf2Sha256Aes256GcmV1,
}

impl EnvelopeScheme {
    /// Name used in the optional `scheme` field.
    pub fn as_wire(&self) -> &'static str {
        match self {
            EnvelopeScheme::Pbkdf2Sha256Aes256GcmV1 => "pbkdf2-sha256-aes256gcm-v1",
        }
    }

    /// Look up a scheme by wire name.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "pbkdf2-sha256-aes256gcm-v1" => Some(EnvelopeScheme::Pbkdf2Sha256Aes256GcmV1),
            _ => None,
        }
    }
}

impl std::fmt::Display for EnvelopeScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One encrypted message: salt, nonce and AEAD output.
///
/// Fields are private; an `Envelope` cannot be modified after it is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireEnvelope", into = "WireEnvelope")]
pub struct Envelope {
    scheme: EnvelopeScheme,
    salt: [u8; SALT_LEN],
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    /// Build a v1 envelope from its parts.
    ///
    /// # Errors
    ///
    /// Returns `EnvelopeError::CiphertextTooShort` if `ciphertext` cannot
    /// contain the authentication tag.
    pub fn from_parts(
        salt: [u8; SALT_LEN],
        iv: [u8; IV_LEN],
        ciphertext: Vec<u8>,
    ) -> Result<Self, EnvelopeError> {
        if ciphertext.len() < TAG_LEN {
            return Err(EnvelopeError::CiphertextTooShort {
                len: ciphertext.len(),
                tag_len: TAG_LEN,
            });
        }
        Ok(Self {
            scheme: EnvelopeScheme::default(),
            salt,
            iv,
            ciphertext,
        })
    }

    /// Scheme this envelope was sealed with.
    pub fn scheme(&self) -> EnvelopeScheme {
        self.scheme
    }

    /// Public salt for key derivation.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Public AEAD nonce.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    /// AEAD output (ciphertext followed by tag).
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Length in bytes of the UTF-8 plaintext this envelope carries.
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len() - TAG_LEN
    }

    /// Encode as the JSON wire format.
    ///
    /// # Errors
    ///
    /// Returns `EnvelopeError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<Vec<u8>, EnvelopeError> {
        serde_json::to_vec(&WireEnvelope::from(self.clone()))
            .map_err(|e| EnvelopeError::Serialization(e.to_string()))
    }

    /// Decode and structurally validate the JSON wire format.
    ///
    /// Validation is structural only: lengths and scheme. Whether the bytes
    /// were sealed under a given password is only known at decrypt time.
    ///
    /// # Errors
    ///
    /// Returns `EnvelopeError` describing the first structural problem found.
    pub fn from_json(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let wire: WireEnvelope =
            serde_json::from_slice(bytes).map_err(|e| EnvelopeError::Malformed(e.to_string()))?;
        Self::try_from(wire)
    }
}

/// Serde shape of the wire format.
///
/// Field order matches what existing stored envelopes were written with.
#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    iv: Vec<u8>,
    salt: Vec<u8>,
    ciphertext: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scheme: Option<String>,
}

impl TryFrom<WireEnvelope> for Envelope {
    type Error = EnvelopeError;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        let scheme = match wire.scheme {
            None => EnvelopeScheme::default(),
            Some(name) => {
                EnvelopeScheme::from_wire(&name).ok_or(EnvelopeError::UnsupportedScheme(name))?
            }
        };

        let iv: [u8; IV_LEN] =
            wire.iv
                .as_slice()
                .try_into()
                .map_err(|_| EnvelopeError::InvalidFieldLength {
                    field: "iv",
                    expected: IV_LEN,
                    actual: wire.iv.len(),
                })?;
        let salt: [u8; SALT_LEN] =
            wire.salt
                .as_slice()
                .try_into()
                .map_err(|_| EnvelopeError::InvalidFieldLength {
                    field: "salt",
                    expected: SALT_LEN,
                    actual: wire.salt.len(),
                })?;

        let mut envelope = Envelope::from_parts(salt, iv, wire.ciphertext)?;
        envelope.scheme = scheme;
        Ok(envelope)
    }
}

impl From<Envelope> for WireEnvelope {
    fn from(envelope: Envelope) -> Self {
        let scheme = (envelope.scheme != EnvelopeScheme::default())
            .then(|| envelope.scheme.as_wire().to_string());
        Self {
            iv: envelope.iv.to_vec(),
            salt: envelope.salt.to_vec(),
            ciphertext: envelope.ciphertext,
            scheme,
        }
    }
}
