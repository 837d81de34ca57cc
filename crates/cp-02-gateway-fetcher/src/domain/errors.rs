//! # Domain Errors
//!
//! Error types for gateway retrieval.

use cp_01_envelope_codec::EnvelopeError;
use shared_types::Endpoint;
use thiserror::Error;

/// Failure reported by a transport for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request exceeded the transport's timeout.
    #[error("Request timed out")]
    Timeout,

    /// Could not connect, or the connection dropped.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body exceeded the configured cap.
    #[error("Response body too large: {size} > {max} bytes")]
    BodyTooLarge {
        /// Observed or announced size
        size: usize,
        /// Configured limit
        max: usize,
    },

    /// Any other transport-level failure.
    #[error("Transport error: {0}")]
    Other(String),
}

/// Why a single endpoint attempt did not produce an envelope.
#[derive(Debug, Error)]
pub enum FailureReason {
    /// Transport failed before a status was received.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// Gateway answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Success status but the body is not an envelope.
    #[error("Malformed envelope body: {0}")]
    MalformedBody(EnvelopeError),
}

/// One endpoint attempt that failed. Always recovered by trying the next one.
#[derive(Debug, Error)]
#[error("Gateway {endpoint} failed for {url}: {reason}")]
pub struct EndpointFailed {
    /// Endpoint that was tried.
    pub endpoint: Endpoint,
    /// Full URL requested.
    pub url: String,
    /// What went wrong.
    pub reason: FailureReason,
}

/// Gateway fetcher error types.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint list was empty; nothing was contacted.
    #[error("No gateway endpoints configured")]
    NoEndpointsConfigured,

    /// Every endpoint was tried once and none produced an envelope.
    #[error("All {} gateways failed; last: {}", attempts.len(), last_failure_text(attempts))]
    AllGatewaysFailed {
        /// Per-endpoint failures in list order.
        attempts: Vec<EndpointFailed>,
    },

    /// Fetcher configuration is unusable.
    #[error("Invalid fetcher configuration: {0}")]
    InvalidConfig(String),
}

impl FetchError {
    /// The last-observed per-endpoint failure, if any.
    pub fn last_failure(&self) -> Option<&EndpointFailed> {
        match self {
            FetchError::AllGatewaysFailed { attempts } => attempts.last(),
            _ => None,
        }
    }
}

fn last_failure_text(attempts: &[EndpointFailed]) -> String {
    attempts
        .last()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}
