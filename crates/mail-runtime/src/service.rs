//! # Mail Service
//!
//! Sender and receiver flows over the codec, the fetcher and the
//! collaborators.
//!
//! ```text
//! send:  validate_password → encrypt → to_json → upload → ledger.record
//! open:  fetch (gateway fallback) → decrypt
//! inbox: ledger.inbox → newest first
//! ```
//!
//! The password is passed per call and never stored, logged or uploaded.

use cp_01_envelope_codec::validate_password;
use cp_02_gateway_fetcher::{GatewayFetchApi, GatewayFetcher, GatewayTransport};
use shared_types::{ContentIdentifier, Endpoint, Identity, InboxEntry};
use tracing::{debug, info};

use crate::config::MailConfig;
use crate::errors::MailError;
use crate::offload::{decrypt_blocking, encrypt_blocking};
use crate::ports::{EnvelopeUploader, MessageLedger};

/// Mail Service - sender and receiver flows.
pub struct MailService<U, L, T>
where
    U: EnvelopeUploader,
    L: MessageLedger,
    T: GatewayTransport,
{
    uploader: U,
    ledger: L,
    fetcher: GatewayFetcher<T>,
    endpoints: Vec<Endpoint>,
}

impl<U, L, T> MailService<U, L, T>
where
    U: EnvelopeUploader,
    L: MessageLedger,
    T: GatewayTransport,
{
    /// Wire the service. The gateway list is taken from `config` as is; an
    /// empty list surfaces as `FetchError::NoEndpointsConfigured` on open.
    pub fn new(uploader: U, ledger: L, transport: T, config: MailConfig) -> Result<Self, MailError> {
        let fetcher = GatewayFetcher::with_config(transport, config.fetcher)?;
        Ok(Self {
            uploader,
            ledger,
            fetcher,
            endpoints: config.endpoints,
        })
    }

    /// Gateways used by [`open_message`](Self::open_message), in order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Seal `text` under `password`, store it and record it for `to`.
    ///
    /// Nothing is uploaded if the password fails policy or sealing fails.
    /// If the ledger call fails the envelope stays uploaded but unreferenced.
    pub async fn send_message(
        &self,
        from: &Identity,
        to: &Identity,
        text: &str,
        password: &str,
    ) -> Result<ContentIdentifier, MailError> {
        validate_password(password)?;

        let envelope = encrypt_blocking(text, password).await?;
        let body = envelope.to_json()?;
        debug!("[runtime] Sealed envelope ({} bytes)", body.len());

        let cid = self.uploader.upload(&body).await?;
        self.ledger.record(from, to, &cid).await?;

        info!("[runtime] Sent {} from {} to {}", cid, from, to);
        Ok(cid)
    }

    /// Message references addressed to `me`, newest first.
    pub async fn load_inbox(&self, me: &Identity) -> Result<Vec<InboxEntry>, MailError> {
        let mut entries = self.ledger.inbox(me).await?;
        entries.reverse();
        debug!("[runtime] Inbox for {}: {} message(s)", me, entries.len());
        Ok(entries)
    }

    /// Retrieve the envelope stored under `cid` and open it.
    pub async fn open_message(
        &self,
        cid: &ContentIdentifier,
        password: &str,
    ) -> Result<String, MailError> {
        let envelope = self.fetcher.fetch(cid, &self.endpoints).await?;
        let text = decrypt_blocking(envelope, password).await?;
        info!("[runtime] Opened {}", cid);
        Ok(text)
    }
}
