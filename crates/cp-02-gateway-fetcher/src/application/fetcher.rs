//! # Gateway Fetcher
//!
//! Ordered fallback across gateways for one content identifier.
//!
//! ## Policy
//!
//! 1. Empty endpoint list fails before any request
//! 2. Endpoints are tried in list order, one attempt each
//! 3. An attempt succeeds only on a 2xx status with a parseable envelope
//! 4. The first success in list order is returned; nothing after it is
//!    awaited and no cross-gateway comparison is made
//!
//! With `max_in_flight > 1` later requests are started early, but results
//! are still consumed in list order, so the earliest-listed success wins.

use async_trait::async_trait;
use cp_01_envelope_codec::Envelope;
use futures::stream::{self, StreamExt};
use shared_types::{ContentIdentifier, Endpoint};
use tracing::{debug, info, warn};

use crate::config::FetcherConfig;
use crate::domain::{EndpointFailed, FailureReason, FetchError, FetchReport};
use crate::ports::{GatewayFetchApi, GatewayTransport};

/// Gateway Fetcher - implements [`GatewayFetchApi`] over a transport.
pub struct GatewayFetcher<T: GatewayTransport> {
    /// Transport (driven port).
    transport: T,
    /// Configuration.
    config: FetcherConfig,
}

impl<T: GatewayTransport> GatewayFetcher<T> {
    /// Create a sequential fetcher.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            config: FetcherConfig::default(),
        }
    }

    /// Create with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidConfig` if `config` does not validate.
    pub fn with_config(transport: T, config: FetcherConfig) -> Result<Self, FetchError> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// Access the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Active configuration.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Internal: one attempt against one endpoint.
    async fn attempt(
        &self,
        cid: &ContentIdentifier,
        endpoint: &Endpoint,
    ) -> Result<Envelope, EndpointFailed> {
        let url = endpoint.resolve(cid);
        debug!("[cp-02] GET {}", url);

        let failed = |reason: FailureReason| EndpointFailed {
            endpoint: endpoint.clone(),
            url: url.clone(),
            reason,
        };

        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|e| failed(e.into()))?;

        if !response.is_success() {
            return Err(failed(FailureReason::Status(response.status)));
        }

        Envelope::from_json(&response.body).map_err(|e| failed(FailureReason::MalformedBody(e)))
    }
}

#[async_trait]
impl<T: GatewayTransport> GatewayFetchApi for GatewayFetcher<T> {
    async fn fetch_with_report(
        &self,
        cid: &ContentIdentifier,
        endpoints: &[Endpoint],
    ) -> Result<FetchReport, FetchError> {
        if endpoints.is_empty() {
            return Err(FetchError::NoEndpointsConfigured);
        }

        // Futures are built up front but only polled by `buffered`, so with
        // `max_in_flight == 1` endpoints are still contacted one at a time.
        let pending: Vec<_> = endpoints
            .iter()
            .map(|endpoint| async move { (endpoint, self.attempt(cid, endpoint).await) })
            .collect();
        let mut attempts = stream::iter(pending).buffered(self.config.max_in_flight.max(1));

        let mut failures = Vec::new();
        while let Some((endpoint, outcome)) = attempts.next().await {
            match outcome {
                Ok(envelope) => {
                    info!(
                        "[cp-02] Fetched {} from {} after {} failed gateway(s)",
                        cid,
                        endpoint,
                        failures.len()
                    );
                    return Ok(FetchReport {
                        envelope,
                        served_by: endpoint.clone(),
                        failures,
                    });
                }
                Err(failure) => {
                    warn!("[cp-02] {}", failure);
                    failures.push(failure);
                }
            }
        }

        warn!("[cp-02] All {} gateways failed for {}", failures.len(), cid);
        Err(FetchError::AllGatewaysFailed { attempts: failures })
    }
}
