use std::path::PathBuf;

use blogs_core::instruction::BlogOperation;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "blogs", version, about = "Client for the blogs on-chain program")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON client config file; flags below override it.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// localnet|devnet|testnet|mainnet
    #[arg(long, global = true)]
    pub cluster: Option<String>,

    /// RPC endpoint (default: the cluster's public endpoint).
    #[arg(long = "url", global = true)]
    pub rpc_url: Option<String>,

    /// Program id override (base58).
    #[arg(long, global = true)]
    pub program_id: Option<String>,

    /// Owner keypair file (default: ~/.config/solana/id.json).
    #[arg(long, global = true)]
    pub keypair: Option<PathBuf>,

    /// Skip the local existence check before create/update.
    #[arg(long, global = true)]
    pub no_precheck: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Record fields. Exactly one digest source may be given; with none, the
/// digest is left empty.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Blog title (max 32 bytes).
    #[arg(long)]
    pub title: Option<String>,

    /// Content pointer, e.g. an IPFS CID (max 64 bytes).
    #[arg(long)]
    pub ipfs_hash: Option<String>,

    /// Precomputed SHA-256 hex digest of the content.
    #[arg(long, conflicts_with_all = ["content", "content_file"])]
    pub sha256: Option<String>,

    /// Content text; its SHA-256 becomes the digest.
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Content file; its SHA-256 becomes the digest.
    #[arg(long)]
    pub content_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print a fresh record id.
    NewId,

    /// Derive the record address for an id and owner.
    Address {
        #[arg(long)]
        id: String,
        /// Owner pubkey (default: the keypair's pubkey).
        #[arg(long)]
        owner: Option<String>,
    },

    /// Print instruction data as hex without sending anything.
    Encode {
        /// initialize|update|delete
        op: BlogOperation,
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Create a record.
    Create {
        /// Record id (default: a fresh one).
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Replace every field of a record.
    Update {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a record and reclaim its rent.
    Delete {
        #[arg(long)]
        id: String,
    },

    /// Fetch and decode a record.
    Show {
        #[arg(long)]
        id: String,
        /// Owner pubkey (default: the keypair's pubkey).
        #[arg(long)]
        owner: Option<String>,
        /// Check this content file against the stored digest.
        #[arg(long)]
        verify_file: Option<PathBuf>,
    },
}
