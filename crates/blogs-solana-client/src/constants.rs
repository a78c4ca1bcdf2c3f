//! Constants shared between the on-chain program and clients.
//!
//! Keep these stable because they affect PDA derivation and error handling.

use solana_program::pubkey::Pubkey;

/// Program id declared by the program itself; used on mainnet and localnet.
pub const MAINNET_PROGRAM_ID: Pubkey = solana_program::pubkey!("229muqFhfrLZVP8q5CrSe7x1LyHLj54wopYdpX9Mzbuw");

/// Program id of the devnet/testnet deployment.
pub const DEVNET_PROGRAM_ID: Pubkey = solana_program::pubkey!("6z68wfurCMYkZG51s1Et9BJEd9nJGUusjHXNt4dGbNNF");

pub const LOCALNET_RPC_URL: &str = "http://127.0.0.1:8899";
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const TESTNET_RPC_URL: &str = "https://api.testnet.solana.com";
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Error codes the deployed program (and the system program it invokes) can
/// return. Carried by `BlogError::RemoteRejected`.
pub mod remote_codes {
    /// System program: the record address already holds an account.
    pub const ACCOUNT_ALREADY_IN_USE: u32 = 0;
    pub const INSTRUCTION_FALLBACK_NOT_FOUND: u32 = 101;
    pub const INSTRUCTION_DID_NOT_DESERIALIZE: u32 = 102;
    pub const CONSTRAINT_SEEDS: u32 = 2006;
    pub const ACCOUNT_DISCRIMINATOR_MISMATCH: u32 = 3002;
    pub const ACCOUNT_DID_NOT_SERIALIZE: u32 = 3004;
    pub const ACCOUNT_NOT_ENOUGH_KEYS: u32 = 3005;
    pub const INVALID_PROGRAM_ID: u32 = 3008;
    pub const ACCOUNT_NOT_SIGNER: u32 = 3010;
    pub const ACCOUNT_NOT_INITIALIZED: u32 = 3012;

    pub fn describe(code: u32) -> Option<&'static str> {
        Some(match code {
            ACCOUNT_ALREADY_IN_USE => "account already in use",
            INSTRUCTION_FALLBACK_NOT_FOUND => "fallback functions are not supported",
            INSTRUCTION_DID_NOT_DESERIALIZE => "the program could not deserialize the given instruction",
            CONSTRAINT_SEEDS => "a seeds constraint was violated",
            ACCOUNT_DISCRIMINATOR_MISMATCH => "account discriminator did not match what was expected",
            ACCOUNT_DID_NOT_SERIALIZE => "failed to serialize the account",
            ACCOUNT_NOT_ENOUGH_KEYS => "not enough account keys given to the instruction",
            INVALID_PROGRAM_ID => "program id was not as expected",
            ACCOUNT_NOT_SIGNER => "the given account did not sign",
            ACCOUNT_NOT_INITIALIZED => "the program expected this account to be already initialized",
            _ => return None,
        })
    }
}
