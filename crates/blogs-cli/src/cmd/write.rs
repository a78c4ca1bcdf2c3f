use anyhow::Result;
use blogs_core::instruction::BlogOperation;
use blogs_solana_client::Submission;
use serde::Serialize;
use solana_sdk::signature::Signer;

use crate::args::FieldArgs;
use crate::io::input;
use crate::output;
use crate::solana::client::SolanaContext;

#[derive(Debug, Serialize)]
pub struct WriteOut {
    pub op: &'static str,
    pub id: String,
    pub owner: String,
    pub address: String,
    pub bump: u8,
    pub signature: String,
}

impl WriteOut {
    fn new(op: BlogOperation, id: &str, owner: &dyn Signer, sub: Submission) -> Self {
        Self {
            op: op.as_str(),
            id: id.to_string(),
            owner: owner.pubkey().to_string(),
            address: sub.address.to_string(),
            bump: sub.bump,
            signature: sub.signature,
        }
    }
}

pub fn create(ctx: &SolanaContext, id: Option<String>, fields: &FieldArgs) -> Result<()> {
    let fields = input::resolve_fields(fields)?;
    let id = id.unwrap_or_else(blogs_core::new_record_id);
    let client = ctx.blog_client()?;
    let owner = ctx.load_keypair()?;
    let ledger = ctx.ledger();

    let pb = output::spinner(&format!("creating {id}"));
    let res = client.create_record(&ledger, &owner, &id, fields);
    pb.finish_and_clear();

    output::print(&WriteOut::new(BlogOperation::Initialize, &id, &owner, res?))
}

pub fn update(ctx: &SolanaContext, id: &str, fields: &FieldArgs) -> Result<()> {
    let fields = input::resolve_fields(fields)?;
    let client = ctx.blog_client()?;
    let owner = ctx.load_keypair()?;
    let ledger = ctx.ledger();

    let pb = output::spinner(&format!("updating {id}"));
    let res = client.update_record(&ledger, &owner, id, fields);
    pb.finish_and_clear();

    output::print(&WriteOut::new(BlogOperation::Update, id, &owner, res?))
}

pub fn delete(ctx: &SolanaContext, id: &str) -> Result<()> {
    let client = ctx.blog_client()?;
    let owner = ctx.load_keypair()?;
    let ledger = ctx.ledger();

    let pb = output::spinner(&format!("deleting {id}"));
    let res = client.delete_record(&ledger, &owner, id);
    pb.finish_and_clear();

    output::print(&WriteOut::new(BlogOperation::Delete, id, &owner, res?))
}
