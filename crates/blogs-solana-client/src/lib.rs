//! blogs-solana-client
//!
//! A small Rust client for the blogs on-chain program.
//!
//! It includes:
//! - program ids per cluster and the program's error codes
//! - explicit client configuration
//! - record PDA derivation
//! - the `Ledger` collaborator trait, with a JSON-RPC and an in-memory implementation
//! - a blog client that builds instructions and submits create/update/delete
//!
//! Encoding and decoding live in `blogs-core` and are re-exported here.

pub mod blog_client;
pub mod config;
pub mod constants;
pub mod ledger;
pub mod memory_ledger;
pub mod pda;

pub use blog_client::*;
pub use config::*;
pub use constants::*;
pub use ledger::*;
pub use memory_ledger::MemoryLedger;
pub use pda::*;

pub use blogs_core::instruction::{BlogInstruction, BlogOperation};
pub use blogs_core::state::{BlogFields, BlogState};
pub use blogs_core::{BlogError, BlogResult};
