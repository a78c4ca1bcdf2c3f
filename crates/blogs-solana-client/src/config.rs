//! Configuration structures for blogs-solana-client.
//!
//! Configuration objects are explicit and serializable. The client never reads
//! environment variables; the CLI (or any other host) builds a `ClientConfig`
//! and passes it in.

use std::fmt;
use std::str::FromStr;

use blogs_core::{BlogError, BlogResult};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;

use crate::constants::{
    DEVNET_PROGRAM_ID, DEVNET_RPC_URL, LOCALNET_RPC_URL, MAINNET_PROGRAM_ID, MAINNET_RPC_URL,
    TESTNET_RPC_URL,
};

/// Deployment environment. Each one has its own program id and RPC endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    #[default]
    Localnet,
    Devnet,
    Testnet,
    Mainnet,
}

impl Cluster {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Localnet => "localnet",
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }

    pub fn program_id(&self) -> Pubkey {
        match self {
            Self::Devnet | Self::Testnet => DEVNET_PROGRAM_ID,
            Self::Localnet | Self::Mainnet => MAINNET_PROGRAM_ID,
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Localnet => LOCALNET_RPC_URL,
            Self::Devnet => DEVNET_RPC_URL,
            Self::Testnet => TESTNET_RPC_URL,
            Self::Mainnet => MAINNET_RPC_URL,
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "localnet" | "localhost" | "local" => Ok(Self::Localnet),
            "devnet" | "solana:devnet" => Ok(Self::Devnet),
            "testnet" | "solana:testnet" => Ok(Self::Testnet),
            "mainnet" | "mainnet-beta" | "solana:mainnet" => Ok(Self::Mainnet),
            other => Err(BlogError::invalid_config(format!("unknown cluster: {other}"))),
        }
    }
}

/// Commitment level used for reads and confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }

    pub fn to_config(self) -> CommitmentConfig {
        match self {
            Self::Processed => CommitmentConfig::processed(),
            Self::Confirmed => CommitmentConfig::confirmed(),
            Self::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub cluster: Cluster,
    /// Overrides the cluster's default RPC endpoint.
    pub rpc_url: Option<String>,
    /// Overrides the cluster's program id (base58).
    pub program_id: Option<String>,
    pub commitment: Commitment,
    /// Query the ledger before create/update. Advisory only.
    pub existence_check: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cluster: Cluster::default(),
            rpc_url: None,
            program_id: None,
            commitment: Commitment::default(),
            existence_check: true,
        }
    }
}

impl ClientConfig {
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self { cluster, ..Self::default() }
    }

    pub fn from_json_str(raw: &str) -> BlogResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| BlogError::invalid_config(format!("invalid config json: {e}")))
    }

    /// Explicit override first, then the cluster's deployment.
    pub fn effective_program_id(&self) -> BlogResult<Pubkey> {
        match &self.program_id {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| BlogError::invalid_config(format!("invalid program id: {raw}"))),
            None => Ok(self.cluster.program_id()),
        }
    }

    pub fn effective_rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.cluster.default_rpc_url().to_string())
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> BlogResult<()> {
    cfg.effective_program_id()?;

    let rpc_url = cfg.effective_rpc_url();
    let parsed = url::Url::parse(&rpc_url)
        .map_err(|e| BlogError::invalid_config(format!("invalid rpc url {rpc_url}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BlogError::invalid_config(format!(
            "rpc url must be http(s), got {}",
            parsed.scheme()
        )));
    }

    Ok(())
}
