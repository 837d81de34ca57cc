//! HTTP gateway transport backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::FetcherConfig;
use crate::domain::{FetchError, TransportError};
use crate::ports::{GatewayResponse, GatewayTransport};

/// Plain GET over HTTP(S) with per-request timeout and a body cap.
#[derive(Clone)]
pub struct HttpGatewayTransport {
    client: Client,
    max_body_bytes: usize,
}

impl HttpGatewayTransport {
    /// Build a transport from fetcher settings.
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| FetchError::InvalidConfig(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    fn classify(e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() || e.is_request() {
            TransportError::Connection(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

#[async_trait]
impl GatewayTransport for HttpGatewayTransport {
    async fn get(&self, url: &str) -> Result<GatewayResponse, TransportError> {
        let mut response = self.client.get(url).send().await.map_err(Self::classify)?;
        let status = response.status().as_u16();

        if let Some(announced) = response.content_length() {
            check_announced_length(announced, self.max_body_bytes)?;
        }

        // Chunked bodies carry no length up front; enforce the cap while reading.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(Self::classify)? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(TransportError::BodyTooLarge {
                    size: body.len() + chunk.len(),
                    max: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(GatewayResponse { status, body })
    }
}

/// Reject a `Content-Length` above `max` before reading any of the body.
/// Lengths that do not fit in `usize` saturate instead of wrapping.
fn check_announced_length(announced: u64, max: usize) -> Result<(), TransportError> {
    let size = usize::try_from(announced).unwrap_or(usize::MAX);
    if size > max {
        return Err(TransportError::BodyTooLarge { size, max });
    }
    Ok(())
}
