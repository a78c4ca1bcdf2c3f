//! Error taxonomy shared by every blogs crate.
//!
//! Codec and derivation failures are local and deterministic. Pre-check
//! failures (`RecordAlreadyExists`, `RecordNotFound`) are advisory: the remote
//! program's verdict, surfaced as `RemoteRejected`, is authoritative.

use solana_program::pubkey::Pubkey;
use thiserror::Error;

pub type BlogResult<T> = Result<T, BlogError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlogError {
    #[error("{field} is {actual} bytes, limit is {limit}")]
    FieldTooLong {
        field: &'static str,
        limit: usize,
        actual: usize,
    },

    #[error("no bump seed yields an off-curve program address")]
    NoValidAddress,

    #[error("truncated data reading {field}: need {needed} bytes, {remaining} remain")]
    TruncatedRecord {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("unknown discriminator {}", hex::encode(.found))]
    UnknownDiscriminator { found: [u8; 8] },

    #[error("{field} is not valid utf-8")]
    InvalidUtf8 { field: &'static str },

    #[error("record already exists at {address}")]
    RecordAlreadyExists { address: Pubkey },

    #[error("no record at {address}")]
    RecordNotFound { address: Pubkey },

    #[error("remote program rejected the transaction{}: {message}", fmt_code(.code))]
    RemoteRejected { code: Option<u32>, message: String },

    #[error("transport failure: {0}")]
    TransportFailure(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

fn fmt_code(code: &Option<u32>) -> String {
    match code {
        Some(c) => format!(" (code {c})"),
        None => String::new(),
    }
}

impl BlogError {
    pub fn field_too_long(field: &'static str, limit: usize, actual: usize) -> Self {
        Self::FieldTooLong { field, limit, actual }
    }

    pub fn remote(code: Option<u32>, message: impl Into<String>) -> Self {
        Self::RemoteRejected { code, message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportFailure(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Only transport failures may succeed when resubmitted unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }
}
