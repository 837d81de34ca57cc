//! In-memory content-addressed store.
//!
//! Stands in for both sides of the storage network: the pinning service the
//! sender uploads to and the gateways the recipient reads from.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cp_02_gateway_fetcher::{GatewayResponse, GatewayTransport, TransportError};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use shared_types::ContentIdentifier;
use tracing::debug;

use crate::errors::CollaboratorError;
use crate::ports::EnvelopeUploader;

/// Content store keyed by hex SHA-256 of the stored bytes.
#[derive(Clone, Default)]
pub struct InMemoryContentStore {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier that `body` is stored under.
    pub fn content_id(body: &[u8]) -> String {
        hex::encode(Sha256::digest(body))
    }

    /// Store bytes under an explicit identifier, bypassing content addressing.
    pub fn insert_raw(&self, cid: &ContentIdentifier, body: Vec<u8>) {
        self.objects.write().insert(cid.as_str().to_string(), body);
    }

    /// Bytes stored under `cid`.
    pub fn get_raw(&self, cid: &ContentIdentifier) -> Option<Vec<u8>> {
        self.objects.read().get(cid.as_str()).cloned()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl EnvelopeUploader for InMemoryContentStore {
    async fn upload(&self, body: &[u8]) -> Result<ContentIdentifier, CollaboratorError> {
        let id = Self::content_id(body);
        let cid =
            ContentIdentifier::new(id).map_err(|e| CollaboratorError::Rejected(e.to_string()))?;
        self.objects
            .write()
            .insert(cid.as_str().to_string(), body.to_vec());
        debug!("[runtime] Stored {} bytes as {}", body.len(), cid);
        Ok(cid)
    }
}

#[async_trait]
impl GatewayTransport for InMemoryContentStore {
    /// Serves the object whose whole identifier ends `url` after a `/`.
    ///
    /// Identifiers may themselves contain `/`; the longest match wins.
    async fn get(&self, url: &str) -> Result<GatewayResponse, TransportError> {
        let objects = self.objects.read();
        let hit = objects
            .iter()
            .filter(|(key, _)| {
                url.strip_suffix(key.as_str())
                    .is_some_and(|base| base.ends_with('/'))
            })
            .max_by_key(|(key, _)| key.len());

        Ok(match hit {
            Some((_, body)) => GatewayResponse {
                status: 200,
                body: body.clone(),
            },
            None => GatewayResponse {
                status: 404,
                body: Vec::new(),
            },
        })
    }
}
