use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::io::input;
use crate::output;
use crate::solana::client::SolanaContext;

#[derive(Debug, Serialize)]
pub struct ShowOut {
    pub id: String,
    pub address: String,
    pub owner: String,
    pub title: String,
    pub ipfs_hash: String,
    pub sha256_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_matches: Option<bool>,
}

pub fn run(ctx: &SolanaContext, id: &str, owner: Option<&str>, verify_file: Option<&Path>) -> Result<()> {
    let client = ctx.blog_client()?;
    let owner = ctx.owner_pubkey(owner)?;
    let pda = client.derive_record(id, &owner)?;

    let state = client
        .fetch_record(&ctx.ledger(), id, &owner)?
        .ok_or_else(|| anyhow!("record not found: {} (id {id})", pda.address))?;

    let content_matches = match verify_file {
        Some(path) => Some(blogs_core::digest_matches(
            &input::read_content_file(path)?,
            state.sha256_hash(),
        )),
        None => None,
    };

    output::print(&ShowOut {
        id: id.to_string(),
        address: pda.address.to_string(),
        owner: state.owner.to_string(),
        title: state.fields.title,
        ipfs_hash: state.fields.ipfs_hash,
        sha256_hash: state.fields.sha256_hash,
        content_matches,
    })?;

    if content_matches == Some(false) {
        return Err(anyhow!("content does not match the stored digest"));
    }
    Ok(())
}
