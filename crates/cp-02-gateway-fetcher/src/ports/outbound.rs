//! # Outbound Ports
//!
//! The one capability the fetcher needs: read the bytes behind a URL.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cp_01_envelope_codec::Envelope;
use parking_lot::Mutex;

use crate::domain::TransportError;

/// Status and body returned by a gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl GatewayResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Gateway transport - outbound port.
///
/// Called once per endpoint attempt. Any timeout is the transport's own and
/// must be reported as `TransportError::Timeout`, never by hanging forever.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// Perform a GET of `url`.
    async fn get(&self, url: &str) -> Result<GatewayResponse, TransportError>;
}

#[async_trait]
impl<T: GatewayTransport + ?Sized> GatewayTransport for Arc<T> {
    async fn get(&self, url: &str) -> Result<GatewayResponse, TransportError> {
        (**self).get(url).await
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Scripted behavior for URLs under one prefix.
#[derive(Clone, Debug)]
pub enum MockRoute {
    /// Answer with this status and body.
    Respond {
        /// HTTP status code.
        status: u16,
        /// Raw body.
        body: Vec<u8>,
    },
    /// Fail at the transport level.
    Fail(TransportError),
    /// Wait, then behave like the inner route.
    Delayed(Duration, Box<MockRoute>),
}

/// Mock gateway for testing.
///
/// Routes are matched by URL prefix in insertion order. Every requested URL
/// is recorded, so tests can assert which gateways were contacted.
#[derive(Clone, Default)]
pub struct MockGateway {
    routes: Arc<Mutex<Vec<(String, MockRoute)>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockGateway {
    /// Create a gateway with no routes (every request fails to connect).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route for URLs starting with `prefix`.
    pub fn with_route(self, prefix: impl Into<String>, route: MockRoute) -> Self {
        self.routes.lock().push((prefix.into(), route));
        self
    }

    /// Serve `envelope` as JSON with status 200 under `prefix`.
    pub fn serving(self, prefix: impl Into<String>, envelope: &Envelope) -> Self {
        let route = match envelope.to_json() {
            Ok(body) => MockRoute::Respond { status: 200, body },
            Err(e) => MockRoute::Fail(TransportError::Other(e.to_string())),
        };
        self.with_route(prefix, route)
    }

    /// Answer every URL under `prefix` with `status` and an empty body.
    pub fn failing_with_status(self, prefix: impl Into<String>, status: u16) -> Self {
        self.with_route(
            prefix,
            MockRoute::Respond {
                status,
                body: Vec::new(),
            },
        )
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Whether any URL under `prefix` was requested.
    pub fn was_contacted(&self, prefix: &str) -> bool {
        self.requests.lock().iter().any(|u| u.starts_with(prefix))
    }

    fn route_for(&self, url: &str) -> Option<MockRoute> {
        self.routes
            .lock()
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, route)| route.clone())
    }
}

#[async_trait]
impl GatewayTransport for MockGateway {
    async fn get(&self, url: &str) -> Result<GatewayResponse, TransportError> {
        self.requests.lock().push(url.to_string());

        let mut route = self
            .route_for(url)
            .ok_or_else(|| TransportError::Connection(format!("no route to {url}")))?;

        loop {
            match route {
                MockRoute::Respond { status, body } => {
                    return Ok(GatewayResponse { status, body });
                }
                MockRoute::Fail(err) => return Err(err),
                MockRoute::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    route = *inner;
                }
            }
        }
    }
}
