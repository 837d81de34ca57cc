//! # Mail Flow Tests
//!
//! Sender and recipient run separate `MailService`s that share only the
//! ledger and the stored bytes, as two clients would.
//!
//! ```text
//! [sender] ──encrypt──→ upload (InMemoryContentStore) ──→ ledger.record
//!                                                            │
//! [recipient] ←─decrypt── fetch (MockGateway, fallback) ←── ledger.inbox
//! ```

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cp_01_envelope_codec::CodecError;
    use cp_02_gateway_fetcher::{FetchError, MockGateway, MockRoute, TransportError};
    use mail_runtime::{InMemoryContentStore, InMemoryLedger, MailConfig, MailError, MailService};
    use shared_types::{ContentIdentifier, Endpoint, Identity};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const ALICE: &str = "0xAbCdEf0123456789abcdef0123456789ABCDEF01";
    const BOB: &str = "0x9876543210fedcba9876543210fedcba98765432";
    const PASSWORD: &str = "shared secret phrase";

    const PRIMARY: &str = "https://primary.example/ipfs/";
    const SECONDARY: &str = "https://secondary.example/ipfs/";
    const TERTIARY: &str = "https://tertiary.example/ipfs/";

    fn identity(s: &str) -> Identity {
        Identity::new(s).unwrap()
    }

    fn gateways() -> Vec<Endpoint> {
        [PRIMARY, SECONDARY, TERTIARY]
            .iter()
            .map(|b| Endpoint::new(*b).unwrap())
            .collect()
    }

    type Sender = MailService<InMemoryContentStore, InMemoryLedger, InMemoryContentStore>;
    type Recipient = MailService<InMemoryContentStore, InMemoryLedger, MockGateway>;

    fn sender(store: &InMemoryContentStore, ledger: &InMemoryLedger) -> Sender {
        MailService::new(store.clone(), ledger.clone(), store.clone(), MailConfig::default())
            .unwrap()
    }

    fn recipient(ledger: &InMemoryLedger, gateway: &MockGateway, config: MailConfig) -> Recipient {
        MailService::new(
            InMemoryContentStore::new(),
            ledger.clone(),
            gateway.clone(),
            config.with_endpoints(gateways()),
        )
        .unwrap()
    }

    /// Sends one message and returns its identifier and stored bytes.
    async fn send(
        store: &InMemoryContentStore,
        ledger: &InMemoryLedger,
        text: &str,
    ) -> (ContentIdentifier, Vec<u8>) {
        let cid = sender(store, ledger)
            .send_message(&identity(ALICE), &identity(BOB), text, PASSWORD)
            .await
            .unwrap();
        let body = store.get_raw(&cid).unwrap();
        (cid, body)
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[tokio::test]
    async fn test_message_survives_failing_primary_gateway() {
        let store = InMemoryContentStore::new();
        let ledger = InMemoryLedger::with_clock(|| 1_700_000_000);
        let (_, body) = send(&store, &ledger, "lunch at noon? 🍜").await;

        let gateway = MockGateway::new()
            .failing_with_status(PRIMARY, 503)
            .with_route(SECONDARY, MockRoute::Fail(TransportError::Timeout))
            .with_route(TERTIARY, MockRoute::Respond { status: 200, body });
        let bob = recipient(&ledger, &gateway, MailConfig::default());

        let inbox = bob.load_inbox(&identity(BOB)).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].sender, identity(ALICE));
        assert_eq!(inbox[0].timestamp, 1_700_000_000);

        let text = bob.open_message(&inbox[0].cid, PASSWORD).await.unwrap();
        assert_eq!(text, "lunch at noon? 🍜");
        assert_eq!(gateway.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_primary_serves_and_backups_untouched() {
        let store = InMemoryContentStore::new();
        let ledger = InMemoryLedger::new();
        let (cid, body) = send(&store, &ledger, "quick one").await;

        let gateway = MockGateway::new()
            .with_route(PRIMARY, MockRoute::Respond { status: 200, body });
        let bob = recipient(&ledger, &gateway, MailConfig::default());

        assert_eq!(bob.open_message(&cid, PASSWORD).await.unwrap(), "quick one");
        assert!(!gateway.was_contacted(SECONDARY));
        assert!(!gateway.was_contacted(TERTIARY));
    }

    #[tokio::test]
    async fn test_recipient_identity_case_does_not_matter() {
        let store = InMemoryContentStore::new();
        let ledger = InMemoryLedger::new();
        send(&store, &ledger, "case test").await;

        let gateway = MockGateway::new();
        let bob = recipient(&ledger, &gateway, MailConfig::default());
        let shouting = identity(&BOB.to_uppercase().replacen("0X", "0x", 1));

        assert_eq!(bob.load_inbox(&shouting).await.unwrap().len(), 1);
    }

    // =============================================================================
    // FAILURE PATHS
    // =============================================================================

    #[tokio::test]
    async fn test_every_gateway_down() {
        let store = InMemoryContentStore::new();
        let ledger = InMemoryLedger::new();
        let (cid, _) = send(&store, &ledger, "lost").await;

        let gateway = MockGateway::new()
            .failing_with_status(PRIMARY, 500)
            .failing_with_status(SECONDARY, 429);
        let bob = recipient(&ledger, &gateway, MailConfig::default());

        match bob.open_message(&cid, PASSWORD).await {
            Err(MailError::Fetch(FetchError::AllGatewaysFailed { attempts })) => {
                assert_eq!(attempts.len(), 3);
                let bases: Vec<_> = attempts.iter().map(|a| a.endpoint.base()).collect();
                assert_eq!(bases, vec![PRIMARY, SECONDARY, TERTIARY]);
            }
            other => panic!("expected AllGatewaysFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tampered_storage_fails_at_decrypt_not_fetch() {
        let store = InMemoryContentStore::new();
        let ledger = InMemoryLedger::new();
        let (cid, body) = send(&store, &ledger, "integrity").await;

        // Flip one ciphertext byte while keeping the JSON well-formed
        let mut value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let first = value["ciphertext"][0].as_u64().unwrap();
        value["ciphertext"][0] = serde_json::json!((first as u8) ^ 0x01);
        let tampered = serde_json::to_vec(&value).unwrap();

        let gateway = MockGateway::new().with_route(
            PRIMARY,
            MockRoute::Respond {
                status: 200,
                body: tampered,
            },
        );
        let bob = recipient(&ledger, &gateway, MailConfig::default());

        let result = bob.open_message(&cid, PASSWORD).await;
        assert!(matches!(
            result,
            Err(MailError::Codec(CodecError::DecryptionFailed))
        ));
        // Fetch was satisfied by the primary
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_garbage_on_primary_falls_back() {
        let store = InMemoryContentStore::new();
        let ledger = InMemoryLedger::new();
        let (cid, body) = send(&store, &ledger, "fallback on junk").await;

        let gateway = MockGateway::new()
            .with_route(
                PRIMARY,
                MockRoute::Respond {
                    status: 200,
                    body: b"<html>gateway busy</html>".to_vec(),
                },
            )
            .with_route(SECONDARY, MockRoute::Respond { status: 200, body });
        let bob = recipient(&ledger, &gateway, MailConfig::default());

        assert_eq!(
            bob.open_message(&cid, PASSWORD).await.unwrap(),
            "fallback on junk"
        );
    }

    // =============================================================================
    // BOUNDED RACE
    // =============================================================================

    #[tokio::test]
    async fn test_race_mode_still_prefers_earliest_listed_gateway() {
        let store = InMemoryContentStore::new();
        let ledger = InMemoryLedger::new();
        let (cid, body) = send(&store, &ledger, "raced").await;

        // Primary is slow; secondary is fast but garbage; tertiary is fast and good
        let gateway = MockGateway::new()
            .with_route(
                PRIMARY,
                MockRoute::Delayed(
                    Duration::from_millis(50),
                    Box::new(MockRoute::Respond {
                        status: 200,
                        body: body.clone(),
                    }),
                ),
            )
            .failing_with_status(SECONDARY, 404)
            .with_route(TERTIARY, MockRoute::Respond { status: 200, body });

        let mut config = MailConfig::default();
        config.fetcher.max_in_flight = 3;
        let bob = recipient(&ledger, &gateway, config);

        assert_eq!(bob.open_message(&cid, PASSWORD).await.unwrap(), "raced");
        // All three were started together
        assert_eq!(gateway.requests().len(), 3);
    }
}
