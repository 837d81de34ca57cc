//! # Cipher-Post Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # Cross-crate flows
//! │   ├── mail_flows.rs   # send → ledger → gateways → open
//! │   ├── wire_format.rs  # envelope JSON compatibility
//! │   └── http_gateways.rs# fetcher over real sockets
//! └── benches/           # criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cp-tests
//! cargo test -p cp-tests integration::wire_format
//! cargo bench -p cp-tests
//! ```

pub mod integration;
