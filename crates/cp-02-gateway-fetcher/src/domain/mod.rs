//! # Domain Module
//!
//! Core types for gateway retrieval.

pub mod errors;

pub use errors::*;

use cp_01_envelope_codec::Envelope;
use shared_types::Endpoint;

/// Outcome of a successful fetch, with the failures seen on the way.
#[derive(Debug)]
pub struct FetchReport {
    /// The envelope that was retrieved.
    pub envelope: Envelope,
    /// Endpoint that served it.
    pub served_by: Endpoint,
    /// Earlier-listed endpoints that failed, in list order.
    pub failures: Vec<EndpointFailed>,
}
