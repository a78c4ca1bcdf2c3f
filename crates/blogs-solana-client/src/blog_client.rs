//! Blog client for the blogs on-chain program.
//!
//! This client can:
//! - derive record PDAs
//! - build instructions (initialize, update, delete)
//! - submit them through any `Ledger` with an explicit signer
//! - fetch and decode records
//!
//! The local existence checks in `create_record` and `update_record` are a
//! courtesy that saves a failed transaction. They can race with other writers;
//! the program's own verdict comes back as `BlogError::RemoteRejected`.

use blogs_core::instruction::BlogInstruction;
use blogs_core::state::{BlogFields, BlogState};
use blogs_core::{BlogError, BlogResult};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signer;
use tracing::{debug, info, warn};

use crate::config::{validate_config, ClientConfig};
use crate::ledger::Ledger;
use crate::pda::{self, RecordPda};

#[derive(Debug, Clone)]
pub struct BlogClient {
    pub program_id: Pubkey,
    pub existence_check: bool,
}

/// Result of an accepted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub signature: String,
    pub address: Pubkey,
    pub bump: u8,
}

impl BlogClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id, existence_check: true }
    }

    pub fn from_config(cfg: &ClientConfig) -> BlogResult<Self> {
        validate_config(cfg)?;
        Ok(Self {
            program_id: cfg.effective_program_id()?,
            existence_check: cfg.existence_check,
        })
    }

    pub fn with_existence_check(mut self, enabled: bool) -> Self {
        self.existence_check = enabled;
        self
    }

    pub fn derive_record(&self, record_id: &str, owner: &Pubkey) -> BlogResult<RecordPda> {
        let pda = pda::pda_for_record(&self.program_id, record_id, owner)?;
        debug!(record_id, owner = %owner, address = %pda.address, bump = pda.bump, "derived record address");
        Ok(pda)
    }

    /// Build instruction to create a record owned (and paid for) by `owner`.
    pub fn ix_initialize(&self, owner: Pubkey, record_id: &str, fields: BlogFields) -> BlogResult<Instruction> {
        self.build(owner, BlogInstruction::initialize(record_id, fields)).map(|(ix, _)| ix)
    }

    /// Build instruction to replace every field of an existing record.
    pub fn ix_update(&self, owner: Pubkey, record_id: &str, fields: BlogFields) -> BlogResult<Instruction> {
        self.build(owner, BlogInstruction::update(record_id, fields)).map(|(ix, _)| ix)
    }

    /// Build instruction to close a record and refund its rent to `owner`.
    pub fn ix_delete(&self, owner: Pubkey, record_id: &str) -> BlogResult<Instruction> {
        self.build(owner, BlogInstruction::delete(record_id)).map(|(ix, _)| ix)
    }

    /// All three instructions take the same accounts in the same order.
    fn build(&self, owner: Pubkey, data: BlogInstruction) -> BlogResult<(Instruction, RecordPda)> {
        let pda = self.derive_record(data.record_id(), &owner)?;
        let bytes = data.pack()?;
        debug!(
            op = data.operation().as_str(),
            len = bytes.len(),
            data = %hex::encode(&bytes),
            "encoded instruction"
        );

        let ix = Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(pda.address, false),
                AccountMeta::new(owner, true),
                AccountMeta::new_readonly(solana_program::system_program::id(), false),
            ],
            data: bytes,
        };
        Ok((ix, pda))
    }

    pub fn create_record<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        owner: &dyn Signer,
        record_id: &str,
        fields: BlogFields,
    ) -> BlogResult<Submission> {
        let (ix, pda) = self.build(owner.pubkey(), BlogInstruction::initialize(record_id, fields))?;
        if self.existence_check && ledger.get_account_data(&pda.address)?.is_some() {
            warn!(address = %pda.address, "record already exists, not submitting");
            return Err(BlogError::RecordAlreadyExists { address: pda.address });
        }
        self.submit(ledger, owner, &ix, pda)
    }

    pub fn update_record<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        owner: &dyn Signer,
        record_id: &str,
        fields: BlogFields,
    ) -> BlogResult<Submission> {
        let (ix, pda) = self.build(owner.pubkey(), BlogInstruction::update(record_id, fields))?;
        if self.existence_check && ledger.get_account_data(&pda.address)?.is_none() {
            warn!(address = %pda.address, "no record to update, not submitting");
            return Err(BlogError::RecordNotFound { address: pda.address });
        }
        self.submit(ledger, owner, &ix, pda)
    }

    pub fn delete_record<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        owner: &dyn Signer,
        record_id: &str,
    ) -> BlogResult<Submission> {
        let (ix, pda) = self.build(owner.pubkey(), BlogInstruction::delete(record_id))?;
        self.submit(ledger, owner, &ix, pda)
    }

    /// Fetch and decode the record for `(record_id, owner)`.
    pub fn fetch_record<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        record_id: &str,
        owner: &Pubkey,
    ) -> BlogResult<Option<BlogState>> {
        let pda = self.derive_record(record_id, owner)?;
        ledger
            .get_account_data(&pda.address)?
            .map(|raw| BlogState::decode(&raw))
            .transpose()
    }

    pub fn record_exists<L: Ledger + ?Sized>(&self, ledger: &L, record_id: &str, owner: &Pubkey) -> BlogResult<bool> {
        let pda = self.derive_record(record_id, owner)?;
        Ok(ledger.get_account_data(&pda.address)?.is_some())
    }

    fn submit<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        owner: &dyn Signer,
        ix: &Instruction,
        pda: RecordPda,
    ) -> BlogResult<Submission> {
        match ledger.submit_transaction(ix, &[owner]) {
            Ok(signature) => {
                info!(%signature, address = %pda.address, "transaction confirmed");
                Ok(Submission { signature, address: pda.address, bump: pda.bump })
            }
            Err(e) => {
                warn!(error = %e, address = %pda.address, "transaction failed");
                Err(e)
            }
        }
    }
}
