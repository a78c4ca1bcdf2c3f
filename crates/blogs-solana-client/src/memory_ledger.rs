//! In-process ledger that behaves like a cluster running the blogs program.
//!
//! Useful for tests and offline tooling. It checks what the deployed program
//! and runtime check (signatures, account list, seeds, account state) and
//! returns the same error codes, so façade behavior can be exercised without
//! a validator.
//!
//! Every transaction is applied under one write lock and only after all checks
//! pass, so a rejected transaction leaves no trace.

use std::collections::BTreeMap;

use blogs_core::instruction::BlogInstruction;
use blogs_core::state::BlogState;
use blogs_core::{BlogError, BlogResult};
use parking_lot::RwLock;
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Signature, Signer};

use crate::constants::remote_codes;
use crate::ledger::Ledger;
use crate::pda::derive_blog_address;

pub struct MemoryLedger {
    program_id: Pubkey,
    accounts: RwLock<BTreeMap<Pubkey, Vec<u8>>>,
}

fn reject(code: u32) -> BlogError {
    BlogError::remote(
        Some(code),
        remote_codes::describe(code).unwrap_or("custom program error"),
    )
}

impl MemoryLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id, accounts: RwLock::new(BTreeMap::new()) }
    }

    /// Store raw bytes at `address`, bypassing the program.
    pub fn set_account_data(&self, address: Pubkey, data: Vec<u8>) {
        self.accounts.write().insert(address, data);
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }

    fn execute(&self, instruction: &Instruction, signers: &[&dyn Signer]) -> BlogResult<()> {
        if instruction.program_id != self.program_id {
            return Err(BlogError::remote(
                None,
                format!("program {} is not deployed", instruction.program_id),
            ));
        }

        for meta in instruction.accounts.iter().filter(|m| m.is_signer) {
            if !signers.iter().any(|s| s.pubkey() == meta.pubkey) {
                return Err(BlogError::remote(
                    None,
                    format!("missing signature for {}", meta.pubkey),
                ));
            }
        }

        let ix = BlogInstruction::unpack(&instruction.data).map_err(|e| match e {
            BlogError::UnknownDiscriminator { .. } => reject(remote_codes::INSTRUCTION_FALLBACK_NOT_FOUND),
            _ => reject(remote_codes::INSTRUCTION_DID_NOT_DESERIALIZE),
        })?;

        let [record, owner, system_program, ..] = instruction.accounts.as_slice() else {
            return Err(reject(remote_codes::ACCOUNT_NOT_ENOUGH_KEYS));
        };
        if !owner.is_signer {
            return Err(reject(remote_codes::ACCOUNT_NOT_SIGNER));
        }
        if system_program.pubkey != solana_program::system_program::id() {
            return Err(reject(remote_codes::INVALID_PROGRAM_ID));
        }

        let derived = derive_blog_address(&self.program_id, ix.record_id().as_bytes(), &owner.pubkey)
            .map_err(|_| reject(remote_codes::CONSTRAINT_SEEDS))?;
        if derived.0 != record.pubkey {
            return Err(reject(remote_codes::CONSTRAINT_SEEDS));
        }

        let mut accounts = self.accounts.write();
        let existing = accounts.get(&record.pubkey);

        match ix {
            BlogInstruction::Initialize { fields, .. } => {
                if existing.is_some() {
                    return Err(reject(remote_codes::ACCOUNT_ALREADY_IN_USE));
                }
                let data = BlogState::new(owner.pubkey, fields)
                    .pack()
                    .map_err(|_| reject(remote_codes::ACCOUNT_DID_NOT_SERIALIZE))?;
                accounts.insert(record.pubkey, data);
            }
            BlogInstruction::Update { fields, .. } => {
                let Some(raw) = existing else {
                    return Err(reject(remote_codes::ACCOUNT_NOT_INITIALIZED));
                };
                let current = BlogState::decode(raw)
                    .map_err(|_| reject(remote_codes::ACCOUNT_DISCRIMINATOR_MISMATCH))?;
                let data = BlogState::new(current.owner, fields)
                    .pack()
                    .map_err(|_| reject(remote_codes::ACCOUNT_DID_NOT_SERIALIZE))?;
                accounts.insert(record.pubkey, data);
            }
            BlogInstruction::Delete { .. } => {
                let Some(raw) = existing else {
                    return Err(reject(remote_codes::ACCOUNT_NOT_INITIALIZED));
                };
                BlogState::decode(raw).map_err(|_| reject(remote_codes::ACCOUNT_DISCRIMINATOR_MISMATCH))?;
                accounts.remove(&record.pubkey);
            }
        }
        Ok(())
    }
}

impl Ledger for MemoryLedger {
    fn get_account_data(&self, address: &Pubkey) -> BlogResult<Option<Vec<u8>>> {
        Ok(self.accounts.read().get(address).cloned())
    }

    fn submit_transaction(&self, instruction: &Instruction, signers: &[&dyn Signer]) -> BlogResult<String> {
        if signers.is_empty() {
            return Err(BlogError::Signing("no signer supplied".to_string()));
        }
        self.execute(instruction, signers)?;
        Ok(Signature::new_unique().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use blogs_core::state::BlogFields;
    use solana_program::instruction::AccountMeta;
    use solana_sdk::signature::Keypair;

    fn ix(program_id: Pubkey, owner: &Pubkey, data: BlogInstruction) -> Instruction {
        let (record, _) = derive_blog_address(&program_id, data.record_id().as_bytes(), owner).unwrap();
        Instruction {
            program_id,
            accounts: vec![
                AccountMeta::new(record, false),
                AccountMeta::new(*owner, true),
                AccountMeta::new_readonly(solana_program::system_program::id(), false),
            ],
            data: data.pack().unwrap(),
        }
    }

    fn fields() -> BlogFields {
        BlogFields::new("Hello", "Qm1", "deadbeef")
    }

    #[test]
    fn initialize_stores_padded_account() {
        let program_id = Pubkey::new_unique();
        let ledger = MemoryLedger::new(program_id);
        let owner = Keypair::new();
        let ix = ix(program_id, &owner.pubkey(), BlogInstruction::initialize("a", fields()));

        ledger.submit_transaction(&ix, &[&owner]).unwrap();

        let raw = ledger.get_account_data(&ix.accounts[0].pubkey).unwrap().unwrap();
        assert_eq!(raw.len(), BlogState::ACCOUNT_SPACE);
        assert_eq!(BlogState::decode(&raw).unwrap(), BlogState::new(owner.pubkey(), fields()));
    }

    #[test]
    fn unsigned_owner_is_rejected() {
        let program_id = Pubkey::new_unique();
        let ledger = MemoryLedger::new(program_id);
        let owner = Keypair::new();
        let stranger = Keypair::new();
        let ix = ix(program_id, &owner.pubkey(), BlogInstruction::initialize("a", fields()));

        assert_matches!(
            ledger.submit_transaction(&ix, &[&stranger]),
            Err(BlogError::RemoteRejected { code: None, .. })
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn wrong_address_violates_seeds() {
        let program_id = Pubkey::new_unique();
        let ledger = MemoryLedger::new(program_id);
        let owner = Keypair::new();
        let mut ix = ix(program_id, &owner.pubkey(), BlogInstruction::initialize("a", fields()));
        ix.accounts[0].pubkey = Pubkey::new_unique();

        assert_matches!(
            ledger.submit_transaction(&ix, &[&owner]),
            Err(BlogError::RemoteRejected { code: Some(remote_codes::CONSTRAINT_SEEDS), .. })
        );
    }

    #[test]
    fn unknown_instruction_is_fallback_error() {
        let program_id = Pubkey::new_unique();
        let ledger = MemoryLedger::new(program_id);
        let owner = Keypair::new();
        let mut ix = ix(program_id, &owner.pubkey(), BlogInstruction::delete("a"));
        ix.data[0] ^= 0xff;

        assert_matches!(
            ledger.submit_transaction(&ix, &[&owner]),
            Err(BlogError::RemoteRejected { code: Some(remote_codes::INSTRUCTION_FALLBACK_NOT_FOUND), .. })
        );
    }

    #[test]
    fn missing_system_program_is_rejected() {
        let program_id = Pubkey::new_unique();
        let ledger = MemoryLedger::new(program_id);
        let owner = Keypair::new();
        let mut ix = ix(program_id, &owner.pubkey(), BlogInstruction::initialize("a", fields()));
        ix.accounts.truncate(2);

        assert_matches!(
            ledger.submit_transaction(&ix, &[&owner]),
            Err(BlogError::RemoteRejected { code: Some(remote_codes::ACCOUNT_NOT_ENOUGH_KEYS), .. })
        );
    }

    #[test]
    fn other_program_is_not_deployed() {
        let ledger = MemoryLedger::new(Pubkey::new_unique());
        let owner = Keypair::new();
        let ix = ix(Pubkey::new_unique(), &owner.pubkey(), BlogInstruction::delete("a"));
        assert_matches!(
            ledger.submit_transaction(&ix, &[&owner]),
            Err(BlogError::RemoteRejected { code: None, .. })
        );
    }

    #[test]
    fn delete_of_corrupt_account_is_rejected_and_kept() {
        let program_id = Pubkey::new_unique();
        let ledger = MemoryLedger::new(program_id);
        let owner = Keypair::new();
        let ix = ix(program_id, &owner.pubkey(), BlogInstruction::delete("a"));
        ledger.set_account_data(ix.accounts[0].pubkey, vec![0u8; 16]);

        assert_matches!(
            ledger.submit_transaction(&ix, &[&owner]),
            Err(BlogError::RemoteRejected { code: Some(remote_codes::ACCOUNT_DISCRIMINATOR_MISMATCH), .. })
        );
        assert_eq!(ledger.len(), 1);
    }
}
