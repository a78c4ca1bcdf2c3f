use anyhow::Result;

use crate::args::{Cli, Command};
use crate::solana::client::SolanaContext;

mod address;
mod encode;
mod new_id;
mod show;
mod write;

pub fn dispatch(cli: Cli) -> Result<()> {
    // Built only for commands that talk to a cluster; offline ones ignore
    // --cluster/--config entirely.
    let ctx = || SolanaContext::from_cli(&cli);

    match &cli.command {
        Command::NewId => new_id::run(),
        Command::Encode { op, id, fields } => encode::run(*op, id, fields),
        Command::Address { id, owner } => address::run(&ctx()?, id, owner.as_deref()),
        Command::Create { id, fields } => write::create(&ctx()?, id.clone(), fields),
        Command::Update { id, fields } => write::update(&ctx()?, id, fields),
        Command::Delete { id } => write::delete(&ctx()?, id),
        Command::Show { id, owner, verify_file } => {
            show::run(&ctx()?, id, owner.as_deref(), verify_file.as_deref())
        }
    }
}
