use anyhow::Result;
use blogs_core::instruction::{BlogInstruction, BlogOperation};
use serde::Serialize;

use crate::args::FieldArgs;
use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct EncodeOut {
    pub instruction: &'static str,
    pub len: usize,
    pub data_hex: String,
}

/// Offline: needs neither a keypair nor a cluster.
pub fn run(op: BlogOperation, id: &str, fields: &FieldArgs) -> Result<()> {
    let ix = match op {
        BlogOperation::Initialize => BlogInstruction::initialize(id, input::resolve_fields(fields)?),
        BlogOperation::Update => BlogInstruction::update(id, input::resolve_fields(fields)?),
        BlogOperation::Delete => BlogInstruction::delete(id),
    };
    let data = ix.pack()?;

    output::print(&EncodeOut {
        instruction: op.as_str(),
        len: data.len(),
        data_hex: hex::encode(&data),
    })
}
