//! Instruction data encoding for the blogs program.
//!
//! Every instruction is an 8-byte discriminator followed by its string
//! arguments, each framed by `wire::WireWriter::string`. Discriminators and
//! argument order are defined here and nowhere else.

use crate::errors::{BlogError, BlogResult};
use crate::state::BlogFields;
use crate::wire::{string_len, WireReader, WireWriter, DISCRIMINATOR_LEN};

pub const INITIALIZE_BLOG_DISCRIMINATOR: [u8; 8] = [195, 223, 187, 134, 244, 232, 54, 32];
pub const UPDATE_BLOG_DISCRIMINATOR: [u8; 8] = [252, 54, 5, 181, 182, 6, 112, 203];
pub const DELETE_BLOG_DISCRIMINATOR: [u8; 8] = [110, 242, 46, 158, 112, 4, 189, 122];

/// Ledger limit on a single PDA seed; the record id is used as one.
pub const MAX_RECORD_ID_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlogOperation {
    Initialize,
    Update,
    Delete,
}

impl BlogOperation {
    pub fn discriminator(&self) -> &'static [u8; 8] {
        match self {
            Self::Initialize => &INITIALIZE_BLOG_DISCRIMINATOR,
            Self::Update => &UPDATE_BLOG_DISCRIMINATOR,
            Self::Delete => &DELETE_BLOG_DISCRIMINATOR,
        }
    }

    pub fn from_discriminator(tag: &[u8; 8]) -> Option<Self> {
        [Self::Initialize, Self::Update, Self::Delete]
            .into_iter()
            .find(|op| op.discriminator() == tag)
    }

    /// Instruction name as declared by the program.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize_blog",
            Self::Update => "update_blog",
            Self::Delete => "delete_blog",
        }
    }
}

impl std::str::FromStr for BlogOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initialize" | "initialize_blog" | "create" => Ok(Self::Initialize),
            "update" | "update_blog" => Ok(Self::Update),
            "delete" | "delete_blog" => Ok(Self::Delete),
            other => Err(format!("unknown operation: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogInstruction {
    Initialize { record_id: String, fields: BlogFields },
    Update { record_id: String, fields: BlogFields },
    Delete { record_id: String },
}

impl BlogInstruction {
    pub fn initialize(record_id: impl Into<String>, fields: BlogFields) -> Self {
        Self::Initialize { record_id: record_id.into(), fields }
    }

    pub fn update(record_id: impl Into<String>, fields: BlogFields) -> Self {
        Self::Update { record_id: record_id.into(), fields }
    }

    pub fn delete(record_id: impl Into<String>) -> Self {
        Self::Delete { record_id: record_id.into() }
    }

    pub fn operation(&self) -> BlogOperation {
        match self {
            Self::Initialize { .. } => BlogOperation::Initialize,
            Self::Update { .. } => BlogOperation::Update,
            Self::Delete { .. } => BlogOperation::Delete,
        }
    }

    pub fn record_id(&self) -> &str {
        match self {
            Self::Initialize { record_id, .. }
            | Self::Update { record_id, .. }
            | Self::Delete { record_id } => record_id,
        }
    }

    pub fn fields(&self) -> Option<&BlogFields> {
        match self {
            Self::Initialize { fields, .. } | Self::Update { fields, .. } => Some(fields),
            Self::Delete { .. } => None,
        }
    }

    /// Exact encoded length.
    pub fn packed_len(&self) -> usize {
        let fields = self.fields().map_or(0, |f| {
            string_len(&f.title) + string_len(&f.ipfs_hash) + string_len(&f.sha256_hash)
        });
        DISCRIMINATOR_LEN + string_len(self.record_id()) + fields
    }

    /// Validate field limits and encode.
    ///
    /// The record id is not limited here; it is bounded by address derivation.
    pub fn pack(&self) -> BlogResult<Vec<u8>> {
        if let Some(fields) = self.fields() {
            fields.validate()?;
        }
        let mut w = WireWriter::with_capacity(self.packed_len());
        w.discriminator(self.operation().discriminator());
        w.string("record_id", self.record_id())?;
        if let Some(fields) = self.fields() {
            fields.write(&mut w)?;
        }
        Ok(w.into_bytes())
    }

    /// Decode instruction data.
    ///
    /// Bytes after the last argument are ignored, as the program ignores them.
    pub fn unpack(data: &[u8]) -> BlogResult<Self> {
        let mut r = WireReader::new(data);
        let tag = r.discriminator()?;
        let op = BlogOperation::from_discriminator(&tag)
            .ok_or(BlogError::UnknownDiscriminator { found: tag })?;
        let record_id = r.string("record_id")?;
        Ok(match op {
            BlogOperation::Initialize => Self::Initialize { record_id, fields: BlogFields::read(&mut r)? },
            BlogOperation::Update => Self::Update { record_id, fields: BlogFields::read(&mut r)? },
            BlogOperation::Delete => Self::Delete { record_id },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn fields() -> BlogFields {
        BlogFields::new("Hello", "Qm1", "deadbeef")
    }

    #[test]
    fn initialize_layout() {
        let data = BlogInstruction::initialize("abc123", fields()).pack().unwrap();
        let mut expected = INITIALIZE_BLOG_DISCRIMINATOR.to_vec();
        expected.extend_from_slice(&[6, 0, 0, 0]);
        expected.extend_from_slice(b"abc123");
        expected.extend_from_slice(&[5, 0, 0, 0]);
        expected.extend_from_slice(b"Hello");
        expected.extend_from_slice(&[3, 0, 0, 0]);
        expected.extend_from_slice(b"Qm1");
        expected.extend_from_slice(&[8, 0, 0, 0]);
        expected.extend_from_slice(b"deadbeef");
        assert_eq!(data, expected);
    }

    #[test]
    fn update_differs_only_in_tag() {
        let init = BlogInstruction::initialize("abc123", fields()).pack().unwrap();
        let update = BlogInstruction::update("abc123", fields()).pack().unwrap();
        assert_eq!(&update[..8], &UPDATE_BLOG_DISCRIMINATOR);
        assert_eq!(&init[8..], &update[8..]);
    }

    #[test]
    fn delete_layout() {
        let data = BlogInstruction::delete("abc123").pack().unwrap();
        let mut expected = DELETE_BLOG_DISCRIMINATOR.to_vec();
        expected.extend_from_slice(&[6, 0, 0, 0]);
        expected.extend_from_slice(b"abc123");
        assert_eq!(data, expected);
    }

    #[test]
    fn packed_len_is_exact() {
        let ix = BlogInstruction::initialize("0123456789abcdef0123456789abcdef", fields());
        assert_eq!(ix.pack().unwrap().len(), ix.packed_len());
        let ix = BlogInstruction::delete("x");
        assert_eq!(ix.pack().unwrap().len(), ix.packed_len());
    }

    #[test]
    fn title_limit_boundary() {
        let ok = BlogFields::new("a".repeat(32), "", "");
        assert!(BlogInstruction::initialize("id", ok).pack().is_ok());

        let long = BlogFields::new("a".repeat(33), "", "");
        assert_matches!(
            BlogInstruction::initialize("id", long).pack(),
            Err(BlogError::FieldTooLong { field: "title", limit: 32, actual: 33 })
        );
    }

    #[test]
    fn pointer_and_digest_limits() {
        let f = BlogFields::new("t", "p".repeat(65), "");
        assert_matches!(
            BlogInstruction::update("id", f).pack(),
            Err(BlogError::FieldTooLong { field: "ipfs_hash", limit: 64, .. })
        );
        let f = BlogFields::new("t", "p".repeat(64), "d".repeat(65));
        assert_matches!(
            BlogInstruction::update("id", f).pack(),
            Err(BlogError::FieldTooLong { field: "sha256_hash", limit: 64, .. })
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = BlogInstruction::initialize("id", fields()).pack().unwrap();
        let b = BlogInstruction::initialize("id", fields()).pack().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unpack_inverts_pack() {
        for ix in [
            BlogInstruction::initialize("abc", fields()),
            BlogInstruction::update("abc", BlogFields::new("New", "QmNew", "")),
            BlogInstruction::delete("abc"),
        ] {
            assert_eq!(BlogInstruction::unpack(&ix.pack().unwrap()).unwrap(), ix);
        }
    }

    #[test]
    fn unpack_rejects_unknown_tag() {
        let data = [0u8; 12];
        assert_matches!(BlogInstruction::unpack(&data), Err(BlogError::UnknownDiscriminator { .. }));
    }

    #[test]
    fn unpack_short_fields() {
        let data = BlogInstruction::initialize("abc", fields()).pack().unwrap();
        assert_matches!(
            BlogInstruction::unpack(&data[..data.len() - 1]),
            Err(BlogError::TruncatedRecord { field: "sha256_hash", .. })
        );
    }

    #[test]
    fn account_and_instruction_tags_differ() {
        use crate::state::BLOG_STATE_DISCRIMINATOR;
        for op in [BlogOperation::Initialize, BlogOperation::Update, BlogOperation::Delete] {
            assert_ne!(op.discriminator(), &BLOG_STATE_DISCRIMINATOR);
            assert_eq!(BlogOperation::from_discriminator(op.discriminator()), Some(op));
        }
    }

    #[test]
    fn operation_names_parse() {
        assert_eq!("create".parse::<BlogOperation>().unwrap(), BlogOperation::Initialize);
        assert_eq!("delete_blog".parse::<BlogOperation>().unwrap(), BlogOperation::Delete);
        assert!("publish".parse::<BlogOperation>().is_err());
    }
}
