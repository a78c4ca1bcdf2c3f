use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use blogs_solana_client::{validate_config, BlogClient, ClientConfig, RpcLedger};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use tracing::debug;

use crate::args::Cli;

/// Everything a command needs to talk to a cluster, resolved from flags.
#[derive(Debug, Clone)]
pub struct SolanaContext {
    pub config: ClientConfig,
    /// `None` when no `--keypair` was given and no home directory is known.
    pub keypair_path: Option<PathBuf>,
}

impl SolanaContext {
    /// Layering: defaults < `--config` file < individual flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                ClientConfig::from_json_str(&raw)?
            }
            None => ClientConfig::default(),
        };

        if let Some(cluster) = &cli.cluster {
            config.cluster = cluster.parse()?;
        }
        if let Some(url) = &cli.rpc_url {
            config.rpc_url = Some(url.clone());
        }
        if let Some(program_id) = &cli.program_id {
            config.program_id = Some(program_id.clone());
        }
        if cli.no_precheck {
            config.existence_check = false;
        }
        validate_config(&config)?;

        let keypair_path = cli.keypair.clone().or_else(default_keypair_path);

        Ok(Self { config, keypair_path })
    }

    pub fn blog_client(&self) -> Result<BlogClient> {
        Ok(BlogClient::from_config(&self.config)?)
    }

    pub fn ledger(&self) -> RpcLedger {
        let ledger = RpcLedger::from_config(&self.config);
        debug!(url = %ledger.url(), commitment = self.config.commitment.as_str(), "using rpc ledger");
        ledger
    }

    pub fn load_keypair(&self) -> Result<Keypair> {
        let path = self
            .keypair_path
            .as_deref()
            .ok_or_else(|| anyhow!("cannot locate home directory; pass --keypair"))?;
        load_keypair(path)
    }

    /// `--owner` if given, else the keypair's pubkey.
    pub fn owner_pubkey(&self, owner: Option<&str>) -> Result<Pubkey> {
        match owner {
            Some(raw) => parse_pubkey(raw),
            None => Ok(self.load_keypair()?.pubkey()),
        }
    }
}

pub fn load_keypair(path: &Path) -> Result<Keypair> {
    read_keypair_file(path).map_err(|e| anyhow!("failed to read keypair {}: {e}", path.display()))
}

pub fn parse_pubkey(raw: &str) -> Result<Pubkey> {
    raw.trim().parse().map_err(|_| anyhow!("invalid pubkey: {raw}"))
}

fn default_keypair_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(PathBuf::from(home).join(".config").join("solana").join("id.json"))
}
