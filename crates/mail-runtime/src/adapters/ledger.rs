//! In-memory message ledger.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{ContentIdentifier, Identity, InboxEntry};
use tracing::debug;

use crate::errors::CollaboratorError;
use crate::ports::MessageLedger;

type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Append-only ledger of `(recipient, entry)` records.
#[derive(Clone)]
pub struct InMemoryLedger {
    records: Arc<RwLock<Vec<(Identity, InboxEntry)>>>,
    clock: Clock,
}

impl InMemoryLedger {
    /// Ledger stamping entries with the system clock.
    pub fn new() -> Self {
        Self::with_clock(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default()
        })
    }

    /// Ledger stamping entries with `clock` (Unix seconds).
    pub fn with_clock(clock: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            clock: Arc::new(clock),
        }
    }

    /// Total records across all inboxes.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageLedger for InMemoryLedger {
    async fn record(
        &self,
        from: &Identity,
        to: &Identity,
        cid: &ContentIdentifier,
    ) -> Result<(), CollaboratorError> {
        let entry = InboxEntry {
            sender: from.clone(),
            timestamp: (self.clock)(),
            cid: cid.clone(),
        };
        self.records.write().push((to.clone(), entry));
        debug!("[runtime] Ledger recorded {} for {}", cid, to);
        Ok(())
    }

    async fn inbox(&self, identity: &Identity) -> Result<Vec<InboxEntry>, CollaboratorError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|(recipient, _)| recipient == identity)
            .map(|(_, entry)| entry.clone())
            .collect())
    }
}
