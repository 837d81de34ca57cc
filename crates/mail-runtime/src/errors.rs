//! # Runtime Errors

use cp_01_envelope_codec::{CodecError, EnvelopeError};
use cp_02_gateway_fetcher::FetchError;
use shared_types::EndpointError;
use thiserror::Error;

/// Failure reported by an upload or ledger collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// Collaborator could not be reached or is not ready.
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    /// Collaborator refused the request.
    #[error("Collaborator rejected request: {0}")]
    Rejected(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A configured gateway is not a usable endpoint.
    #[error("Invalid gateway endpoint: {0}")]
    Endpoint(#[from] EndpointError),

    /// No gateways remain after parsing.
    #[error("At least one gateway endpoint is required")]
    NoGateways,

    /// Fetcher settings are unusable.
    #[error(transparent)]
    Fetcher(#[from] FetchError),
}

/// Errors surfaced by [`MailService`](crate::MailService).
#[derive(Debug, Error)]
pub enum MailError {
    /// Sealing or opening failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Envelope could not be serialized.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// No gateway produced the envelope.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Upload or ledger call failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// A blocking crypto task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}
