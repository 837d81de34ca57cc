//! # HTTP Gateway Tests
//!
//! The reqwest transport against throwaway local HTTP servers, driven by
//! the fetcher's fallback loop.

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use cp_01_envelope_codec::{decrypt, encrypt};
    use cp_02_gateway_fetcher::{
        FailureReason, FetchError, FetcherConfig, GatewayFetchApi, GatewayFetcher,
        HttpGatewayTransport, TransportError,
    };
    use shared_types::{ContentIdentifier, Endpoint};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `response_body` with `status_line` to every connection, and
    /// report the request line of each one.
    async fn gateway(
        status_line: &'static str,
        response_body: Vec<u8>,
    ) -> (SocketAddr, tokio::sync::mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (seen_tx, seen_rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let line = request.lines().next().unwrap_or_default().to_string();
                let _ = seen_tx.send(line);

                let head = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    response_body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&response_body).await;
                let _ = socket.shutdown().await;
            }
        });

        (addr, seen_rx)
    }

    async fn closed_port() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    }

    fn fetcher() -> GatewayFetcher<HttpGatewayTransport> {
        let config = FetcherConfig::for_testing();
        let transport = HttpGatewayTransport::new(&config).unwrap();
        GatewayFetcher::with_config(transport, config).unwrap()
    }

    #[tokio::test]
    async fn test_falls_back_over_real_sockets() {
        let envelope = encrypt("over the wire", "socket-password").unwrap();
        let dead = closed_port().await;
        let (not_found, _) = gateway("404 Not Found", b"not pinned".to_vec()).await;
        let (good, mut seen) = gateway("200 OK", envelope.to_json().unwrap()).await;

        let endpoints = vec![
            Endpoint::new(format!("http://{dead}/ipfs/")).unwrap(),
            Endpoint::new(format!("http://{not_found}/ipfs")).unwrap(),
            Endpoint::new(format!("http://{good}/ipfs/")).unwrap(),
        ];
        let cid = ContentIdentifier::new("bafyTestCid").unwrap();

        let report = fetcher().fetch_with_report(&cid, &endpoints).await.unwrap();

        assert_eq!(report.served_by, endpoints[2]);
        assert!(matches!(
            report.failures[0].reason,
            FailureReason::Transport(TransportError::Connection(_))
        ));
        assert!(matches!(report.failures[1].reason, FailureReason::Status(404)));
        assert_eq!(seen.recv().await.unwrap(), "GET /ipfs/bafyTestCid HTTP/1.1");
        assert_eq!(
            decrypt(&report.envelope, "socket-password").unwrap(),
            "over the wire"
        );
    }

    #[tokio::test]
    async fn test_all_real_gateways_failing() {
        let (a, _) = gateway("500 Internal Server Error", Vec::new()).await;
        let (b, _) = gateway("200 OK", b"{\"iv\":[1,2,3]}".to_vec()).await;

        let endpoints = vec![
            Endpoint::new(format!("http://{a}/ipfs/")).unwrap(),
            Endpoint::new(format!("http://{b}/ipfs/")).unwrap(),
        ];
        let cid = ContentIdentifier::new("bafyMissing").unwrap();

        let err = fetcher().fetch(&cid, &endpoints).await.unwrap_err();

        match err {
            FetchError::AllGatewaysFailed { attempts } => {
                assert!(matches!(attempts[0].reason, FailureReason::Status(500)));
                assert!(matches!(attempts[1].reason, FailureReason::MalformedBody(_)));
            }
            other => panic!("expected AllGatewaysFailed, got {other:?}"),
        }
    }
}
