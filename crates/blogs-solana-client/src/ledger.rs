//! Ledger collaborator.
//!
//! The façade only needs two things from a ledger: read the raw bytes stored
//! at an address, and execute a signed transaction atomically. `RpcLedger`
//! does this against a cluster over JSON-RPC; `MemoryLedger` (see
//! `memory_ledger`) does it in process.

use blogs_core::{BlogError, BlogResult};
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_client::RpcClient;
use solana_program::instruction::{Instruction, InstructionError};
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signer;
use solana_sdk::transaction::{Transaction, TransactionError};

use crate::config::ClientConfig;
use crate::constants::remote_codes;

pub trait Ledger {
    /// Raw account data, or `None` when nothing lives at `address`.
    fn get_account_data(&self, address: &Pubkey) -> BlogResult<Option<Vec<u8>>>;

    /// Sign with `signers` (the first one pays) and execute `instruction` as
    /// one transaction. Returns the transaction signature.
    fn submit_transaction(&self, instruction: &Instruction, signers: &[&dyn Signer]) -> BlogResult<String>;
}

impl<L: Ledger + ?Sized> Ledger for &L {
    fn get_account_data(&self, address: &Pubkey) -> BlogResult<Option<Vec<u8>>> {
        (**self).get_account_data(address)
    }

    fn submit_transaction(&self, instruction: &Instruction, signers: &[&dyn Signer]) -> BlogResult<String> {
        (**self).submit_transaction(instruction, signers)
    }
}

/// Blocking JSON-RPC ledger.
pub struct RpcLedger {
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcLedger {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
            commitment,
        }
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self::new(&cfg.effective_rpc_url(), cfg.commitment.to_config())
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

impl Ledger for RpcLedger {
    fn get_account_data(&self, address: &Pubkey) -> BlogResult<Option<Vec<u8>>> {
        let resp = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .map_err(map_client_error)?;
        Ok(resp.value.map(|account| account.data))
    }

    fn submit_transaction(&self, instruction: &Instruction, signers: &[&dyn Signer]) -> BlogResult<String> {
        let payer = signers
            .first()
            .ok_or_else(|| BlogError::Signing("no signer supplied".to_string()))?;
        let blockhash = self.rpc.get_latest_blockhash().map_err(map_client_error)?;

        let mut tx = Transaction::new_with_payer(std::slice::from_ref(instruction), Some(&payer.pubkey()));
        tx.try_sign(signers, blockhash)
            .map_err(|e| BlogError::Signing(e.to_string()))?;

        let sig = self
            .rpc
            .send_and_confirm_transaction(&tx)
            .map_err(map_client_error)?;
        Ok(sig.to_string())
    }
}

/// Classify an RPC failure.
///
/// Anything the cluster executed and refused is `RemoteRejected`, with the
/// program's custom code when there is one. Everything else never reached a
/// verdict and is a `TransportFailure`.
pub fn map_client_error(err: ClientError) -> BlogError {
    if let Some(tx_err) = err.get_transaction_error() {
        return map_transaction_error(&tx_err);
    }
    match err.kind() {
        ClientErrorKind::SigningError(e) => BlogError::Signing(e.to_string()),
        _ => BlogError::transport(err.to_string()),
    }
}

pub fn map_transaction_error(tx_err: &TransactionError) -> BlogError {
    match tx_err {
        // Never executed; the same instruction may land on a later attempt.
        TransactionError::BlockhashNotFound
        | TransactionError::AlreadyProcessed
        | TransactionError::ClusterMaintenance
        | TransactionError::WouldExceedMaxBlockCostLimit
        | TransactionError::WouldExceedMaxAccountCostLimit
        | TransactionError::WouldExceedMaxVoteCostLimit
        | TransactionError::WouldExceedAccountDataBlockLimit
        | TransactionError::WouldExceedAccountDataTotalLimit => BlogError::transport(tx_err.to_string()),
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            let message = match remote_codes::describe(*code) {
                Some(known) => format!("{tx_err} ({known})"),
                None => tx_err.to_string(),
            };
            BlogError::remote(Some(*code), message)
        }
        _ => BlogError::remote(None, tx_err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn custom_program_error_keeps_code() {
        let err = TransactionError::InstructionError(0, InstructionError::Custom(3012));
        assert_matches!(map_transaction_error(&err), BlogError::RemoteRejected { code: Some(3012), .. });
    }

    #[test]
    fn other_instruction_errors_have_no_code() {
        let err = TransactionError::InstructionError(0, InstructionError::MissingRequiredSignature);
        assert_matches!(map_transaction_error(&err), BlogError::RemoteRejected { code: None, .. });
        assert_matches!(
            map_transaction_error(&TransactionError::AccountNotFound),
            BlogError::RemoteRejected { code: None, .. }
        );
    }

    #[test]
    fn expired_blockhash_is_retryable() {
        let mapped = map_client_error(ClientError::from(TransactionError::BlockhashNotFound));
        assert_matches!(mapped, BlogError::TransportFailure(_));
        assert!(mapped.is_retryable());

        for err in [
            TransactionError::AlreadyProcessed,
            TransactionError::ClusterMaintenance,
            TransactionError::WouldExceedMaxBlockCostLimit,
        ] {
            assert!(map_transaction_error(&err).is_retryable(), "{err}");
        }
    }

    #[test]
    fn io_failure_is_transport() {
        let err = ClientError::from(std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out"));
        let mapped = map_client_error(err);
        assert_matches!(mapped, BlogError::TransportFailure(_));
        assert!(mapped.is_retryable());
    }

    #[test]
    fn transaction_error_kind_is_remote() {
        let err = ClientError::from(TransactionError::InstructionError(
            0,
            InstructionError::Custom(0),
        ));
        assert_matches!(map_client_error(err), BlogError::RemoteRejected { code: Some(0), .. });
    }
}
