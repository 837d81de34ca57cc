//! # Inbound Ports
//!
//! API trait defining what the Gateway Fetcher can do.

use async_trait::async_trait;
use cp_01_envelope_codec::Envelope;
use shared_types::{ContentIdentifier, Endpoint};

use crate::domain::{FetchError, FetchReport};

/// Gateway Fetcher API - inbound port.
#[async_trait]
pub trait GatewayFetchApi: Send + Sync {
    /// Retrieve the envelope stored under `cid`, trying `endpoints` in order.
    ///
    /// Returns the first structurally valid envelope. Each endpoint gets at
    /// most one attempt per call.
    async fn fetch(
        &self,
        cid: &ContentIdentifier,
        endpoints: &[Endpoint],
    ) -> Result<Envelope, FetchError> {
        self.fetch_with_report(cid, endpoints)
            .await
            .map(|report| report.envelope)
    }

    /// Same as [`fetch`](Self::fetch), also returning which endpoint served
    /// the envelope and which ones failed before it.
    async fn fetch_with_report(
        &self,
        cid: &ContentIdentifier,
        endpoints: &[Endpoint],
    ) -> Result<FetchReport, FetchError>;
}
