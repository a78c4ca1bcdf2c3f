use anyhow::Result;
use serde::Serialize;

use crate::output;
use crate::solana::client::SolanaContext;

#[derive(Debug, Serialize)]
pub struct AddressOut {
    pub id: String,
    pub owner: String,
    pub program_id: String,
    pub address: String,
    pub bump: u8,
}

pub fn run(ctx: &SolanaContext, id: &str, owner: Option<&str>) -> Result<()> {
    let client = ctx.blog_client()?;
    let owner = ctx.owner_pubkey(owner)?;
    let pda = client.derive_record(id, &owner)?;

    output::print(&AddressOut {
        id: id.to_string(),
        owner: owner.to_string(),
        program_id: client.program_id.to_string(),
        address: pda.address.to_string(),
        bump: pda.bump,
    })
}
