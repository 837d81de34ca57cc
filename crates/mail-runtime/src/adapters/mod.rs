//! # Adapters
//!
//! In-memory collaborators for local use and tests.

pub mod content_store;
pub mod ledger;

pub use content_store::InMemoryContentStore;
pub use ledger::InMemoryLedger;
