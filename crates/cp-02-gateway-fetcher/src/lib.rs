//! # CP-02 Gateway Fetcher
//!
//! Retrieve an envelope by content identifier from an ordered list of
//! public gateways, falling back on failure.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Failure Policy
//!
//! | Gateway outcome | Treatment |
//! |-----------------|-----------|
//! | Connection error / timeout | Try next endpoint |
//! | Non-2xx status | Try next endpoint |
//! | 2xx but body is not an envelope | Try next endpoint |
//! | 2xx with valid envelope | Return it, stop |
//!
//! When every endpoint fails the caller gets `FetchError::AllGatewaysFailed`
//! with the per-endpoint causes. An empty list is `NoEndpointsConfigured`.
//! Fetching never decrypts; a retrieved envelope may still fail to open.
//!
//! ## Module Structure
//!
//! ```text
//! cp-02-gateway-fetcher/
//! ├── domain/          # FetchReport, errors
//! ├── ports/           # GatewayFetchApi (inbound) + GatewayTransport (outbound)
//! ├── application/     # GatewayFetcher fallback loop
//! ├── adapters/        # reqwest transport
//! └── config.rs        # FetcherConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::HttpGatewayTransport;
pub use application::GatewayFetcher;
pub use config::FetcherConfig;
pub use domain::{EndpointFailed, FailureReason, FetchError, FetchReport, TransportError};
pub use ports::{GatewayFetchApi, GatewayResponse, GatewayTransport, MockGateway, MockRoute};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
