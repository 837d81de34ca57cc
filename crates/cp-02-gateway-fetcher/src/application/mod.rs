//! # Application Module
//!
//! Fetch orchestration over the outbound transport.

pub mod fetcher;

pub use fetcher::GatewayFetcher;
