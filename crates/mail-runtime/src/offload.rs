//! Codec calls moved off the async executor.
//!
//! Each call runs 100,000 PBKDF2 rounds, long enough to stall a worker
//! thread. Both helpers run the codec on the blocking pool; the password
//! copy handed to the pool is wiped when the task finishes.

use cp_01_envelope_codec::{decrypt, encrypt, Envelope};
use zeroize::Zeroizing;

use crate::errors::MailError;

/// [`encrypt`] on the blocking pool.
pub async fn encrypt_blocking(plaintext: &str, password: &str) -> Result<Envelope, MailError> {
    let plaintext = Zeroizing::new(plaintext.to_owned());
    let password = Zeroizing::new(password.to_owned());

    tokio::task::spawn_blocking(move || encrypt(&plaintext, &password))
        .await
        .map_err(|e| MailError::TaskFailed(e.to_string()))?
        .map_err(MailError::from)
}

/// [`decrypt`] on the blocking pool.
pub async fn decrypt_blocking(envelope: Envelope, password: &str) -> Result<String, MailError> {
    let password = Zeroizing::new(password.to_owned());

    tokio::task::spawn_blocking(move || decrypt(&envelope, &password))
        .await
        .map_err(|e| MailError::TaskFailed(e.to_string()))?
        .map_err(MailError::from)
}
