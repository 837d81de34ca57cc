//! Sender-side password policy.

use crate::CodecError;

/// Minimum password length for new messages, in UTF-16 code units.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Check a password against the policy for sealing new messages.
///
/// Length is counted in UTF-16 code units, so a character outside the Basic
/// Multilingual Plane (most emoji) counts as two. Other clients enforce the
/// same limit with the same count. Opening never applies this policy, since
/// older envelopes may use shorter passwords.
///
/// # Errors
///
/// Returns `CodecError::WeakPassword` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), CodecError> {
    let actual = password.encode_utf16().count();
    if actual < MIN_PASSWORD_CHARS {
        return Err(CodecError::WeakPassword {
            min: MIN_PASSWORD_CHARS,
            actual,
        });
    }
    Ok(())
}
