//! blogs-core
//!
//! Core primitives for the blogs program client:
//! - length-prefixed wire reader/writer
//! - instruction encoding (initialize, update, delete)
//! - `BlogState` account decoding
//! - the shared error taxonomy
//! - content digests and record ids
//!
//! Nothing here performs I/O. Address derivation and ledger access live in
//! `blogs-solana-client`.

pub mod digest;
pub mod errors;
pub mod instruction;
pub mod state;
pub mod wire;

pub use crate::errors::{BlogError, BlogResult};

#[cfg(feature = "sha256")]
pub use crate::digest::{content_digest_hex, digest_matches};
pub use crate::digest::new_record_id;
