//! # Mail Configuration
//!
//! Gateway list and fetcher settings, with environment overrides:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `CP_GATEWAYS` | Comma-separated gateway base URLs, in preference order |
//! | `CP_GATEWAY_TIMEOUT_SECS` | Per-request timeout |
//! | `CP_MAX_IN_FLIGHT` | Concurrent gateway requests (1 = sequential) |

use cp_02_gateway_fetcher::FetcherConfig;
use serde::{Deserialize, Serialize};
use shared_types::Endpoint;
use tracing::info;

use crate::errors::ConfigError;

/// Public gateways tried when nothing is configured. First is primary.
pub const DEFAULT_GATEWAYS: [&str; 3] = [
    "https://gateway.pinata.cloud/ipfs/",
    "https://ipfs.io/ipfs/",
    "https://dweb.link/ipfs/",
];

/// Runtime configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MailConfig {
    /// Gateways in preference order.
    pub endpoints: Vec<Endpoint>,
    /// Fetcher transport and fan-out settings.
    pub fetcher: FetcherConfig,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_GATEWAYS
                .iter()
                .filter_map(|base| Endpoint::new(*base).ok())
                .collect(),
            fetcher: FetcherConfig::default(),
        }
    }
}

impl MailConfig {
    /// Defaults overridden by `CP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("CP_GATEWAYS") {
            config.endpoints = parse_gateways(&raw)?;
            info!(
                "[runtime] Using {} gateway(s) from CP_GATEWAYS",
                config.endpoints.len()
            );
        }
        if let Some(raw) = lookup("CP_GATEWAY_TIMEOUT_SECS") {
            config.fetcher.request_timeout_secs = parse_number("CP_GATEWAY_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("CP_MAX_IN_FLIGHT") {
            config.fetcher.max_in_flight = parse_number("CP_MAX_IN_FLIGHT", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Replace the gateway list.
    pub fn with_endpoints(mut self, endpoints: Vec<Endpoint>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoints.is_empty() {
            return Err(ConfigError::NoGateways);
        }
        self.fetcher.validate()?;
        Ok(())
    }
}

/// Parse a comma-separated gateway list. Blank items are skipped.
pub fn parse_gateways(raw: &str) -> Result<Vec<Endpoint>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| Endpoint::new(item).map_err(ConfigError::from))
        .collect()
}

fn parse_number<N>(var: &'static str, raw: &str) -> Result<N, ConfigError>
where
    N: std::str::FromStr,
    N::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: N::Err| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
