//! # Cipher-Post Mail Runtime
//!
//! Application layer: wires the envelope codec (cp-01) and the gateway
//! fetcher (cp-02) to the upload and ledger collaborators.
//!
//! ## Module Structure
//!
//! ```text
//! mail-runtime/
//! ├── config.rs     # MailConfig + CP_* environment overrides
//! ├── ports.rs      # EnvelopeUploader, MessageLedger
//! ├── adapters/     # In-memory content store and ledger
//! ├── offload.rs    # Codec calls on the blocking pool
//! ├── service.rs    # MailService sender/receiver flows
//! └── main.rs       # cipher-post CLI
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod errors;
pub mod offload;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryContentStore, InMemoryLedger};
pub use config::{parse_gateways, MailConfig, DEFAULT_GATEWAYS};
pub use errors::{CollaboratorError, ConfigError, MailError};
pub use offload::{decrypt_blocking, encrypt_blocking};
pub use ports::{EnvelopeUploader, MessageLedger};
pub use service::MailService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
