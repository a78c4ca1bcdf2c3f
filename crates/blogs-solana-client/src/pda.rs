//! PDA derivation helpers for the blogs program.
//!
//! A record lives at the program address derived from the seeds
//! `[record_id bytes, owner bytes]`, in that order. Swapping the seeds yields a
//! different address that the program will reject.

use blogs_core::instruction::MAX_RECORD_ID_LEN;
use blogs_core::{BlogError, BlogResult};
use solana_program::pubkey::Pubkey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordPda {
    pub address: Pubkey,
    pub bump: u8,
}

/// Derive the record address for `(record_id, owner)` under `program_id`.
///
/// The bump search starts at 255 and takes the first off-curve result.
pub fn derive_blog_address(program_id: &Pubkey, record_id: &[u8], owner: &Pubkey) -> BlogResult<(Pubkey, u8)> {
    if record_id.len() > MAX_RECORD_ID_LEN {
        return Err(BlogError::field_too_long("record_id", MAX_RECORD_ID_LEN, record_id.len()));
    }
    Pubkey::try_find_program_address(&[record_id, owner.as_ref()], program_id).ok_or(BlogError::NoValidAddress)
}

pub fn pda_for_record(program_id: &Pubkey, record_id: &str, owner: &Pubkey) -> BlogResult<RecordPda> {
    let (address, bump) = derive_blog_address(program_id, record_id.as_bytes(), owner)?;
    Ok(RecordPda { address, bump })
}

/// Check a claimed address against the derivation with a known bump.
pub fn verify_blog_address(
    program_id: &Pubkey,
    record_id: &[u8],
    owner: &Pubkey,
    bump: u8,
    address: &Pubkey,
) -> bool {
    Pubkey::create_program_address(&[record_id, owner.as_ref(), &[bump]], program_id)
        .map(|derived| &derived == address)
        .unwrap_or(false)
}
