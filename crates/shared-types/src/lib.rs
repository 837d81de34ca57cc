//! # Shared Types Crate
//!
//! Value types passed between the envelope codec, the gateway fetcher and
//! the mail runtime.
//!
//! ## Design Principles
//!
//! - **Opaque identifiers**: a `ContentIdentifier` is only ever composed
//!   into a retrieval URL, never parsed for structure.
//! - **Validated at construction**: every type here is checked once when
//!   built from a string, so downstream code never re-validates.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
