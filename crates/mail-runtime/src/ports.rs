//! # Collaborator Ports
//!
//! Upload and ledger capabilities the mail service depends on. Neither is
//! retried here; retry policy belongs to the adapter.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{ContentIdentifier, Identity, InboxEntry};

use crate::errors::CollaboratorError;

/// Stores a serialized envelope and names it.
#[async_trait]
pub trait EnvelopeUploader: Send + Sync {
    /// Store `body` (envelope JSON) and return its content identifier.
    async fn upload(&self, body: &[u8]) -> Result<ContentIdentifier, CollaboratorError>;
}

/// Records which identity sent which content to whom.
#[async_trait]
pub trait MessageLedger: Send + Sync {
    /// Append a message reference to `to`'s inbox.
    async fn record(
        &self,
        from: &Identity,
        to: &Identity,
        cid: &ContentIdentifier,
    ) -> Result<(), CollaboratorError>;

    /// All references recorded for `identity`, oldest first.
    async fn inbox(&self, identity: &Identity) -> Result<Vec<InboxEntry>, CollaboratorError>;
}

#[async_trait]
impl<T: EnvelopeUploader + ?Sized> EnvelopeUploader for Arc<T> {
    async fn upload(&self, body: &[u8]) -> Result<ContentIdentifier, CollaboratorError> {
        (**self).upload(body).await
    }
}

#[async_trait]
impl<T: MessageLedger + ?Sized> MessageLedger for Arc<T> {
    async fn record(
        &self,
        from: &Identity,
        to: &Identity,
        cid: &ContentIdentifier,
    ) -> Result<(), CollaboratorError> {
        (**self).record(from, to, cid).await
    }

    async fn inbox(&self, identity: &Identity) -> Result<Vec<InboxEntry>, CollaboratorError> {
        (**self).inbox(identity).await
    }
}
