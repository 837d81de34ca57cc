//! # Fetcher Configuration
//!
//! Transport and fan-out settings. The endpoint list itself is not part of
//! this config; it is passed to every `fetch` call.

use serde::{Deserialize, Serialize};

use crate::domain::FetchError;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default cap on a response body. Envelopes for short messages are a few KiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Gateway fetcher configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Requests allowed in flight at once.
    ///
    /// `1` tries endpoints strictly one after another. Larger values start
    /// up to that many requests ahead; the earliest-listed success still wins.
    pub max_in_flight: usize,

    /// Per-request timeout applied by the HTTP transport, in seconds.
    pub request_timeout_secs: u64,

    /// TCP/TLS connect timeout applied by the HTTP transport, in seconds.
    pub connect_timeout_secs: u64,

    /// Bodies larger than this are treated as endpoint failures.
    pub max_body_bytes: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 1,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: 5,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl FetcherConfig {
    /// Create a config for testing (short timeouts).
    pub fn for_testing() -> Self {
        Self {
            max_in_flight: 1,
            request_timeout_secs: 1,
            connect_timeout_secs: 1,
            max_body_bytes: 64 * 1024,
        }
    }

    /// Builder-style method to set the in-flight limit.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.max_in_flight == 0 {
            return Err(FetchError::InvalidConfig(
                "max_in_flight cannot be 0".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(FetchError::InvalidConfig(
                "request_timeout_secs cannot be 0".to_string(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(FetchError::InvalidConfig(
                "max_body_bytes cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}
