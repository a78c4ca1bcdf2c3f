//! `BlogState` account layout.
//!
//! ```text
//! [0..8)    account discriminator
//! [8..40)   owner pubkey
//! ...       title       (u32 LE len + utf-8, <= 32 bytes)
//! ...       ipfs_hash   (u32 LE len + utf-8, <= 64 bytes)
//! ...       sha256_hash (u32 LE len + utf-8, <= 64 bytes)
//! ...       zero padding up to ACCOUNT_SPACE
//! ```

use solana_program::pubkey::Pubkey;

use crate::errors::{BlogError, BlogResult};
use crate::wire::{WireReader, WireWriter, DISCRIMINATOR_LEN, LEN_PREFIX, PUBKEY_LEN};

/// Account-type tag for `BlogState`. Distinct from every instruction tag.
pub const BLOG_STATE_DISCRIMINATOR: [u8; 8] = [244, 86, 195, 29, 196, 144, 214, 46];

pub const MAX_TITLE_LEN: usize = 32;
pub const MAX_IPFS_HASH_LEN: usize = 64;
pub const MAX_SHA256_HASH_LEN: usize = 64;

/// The mutable part of a record. Initialize and Update carry the same triple.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogFields {
    pub title: String,
    /// Content pointer, typically an IPFS CID.
    pub ipfs_hash: String,
    /// SHA-256 hex digest of the content.
    pub sha256_hash: String,
}

impl BlogFields {
    pub fn new(
        title: impl Into<String>,
        ipfs_hash: impl Into<String>,
        sha256_hash: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            ipfs_hash: ipfs_hash.into(),
            sha256_hash: sha256_hash.into(),
        }
    }

    /// Check every field against its encoded-byte limit.
    pub fn validate(&self) -> BlogResult<()> {
        check_len("title", &self.title, MAX_TITLE_LEN)?;
        check_len("ipfs_hash", &self.ipfs_hash, MAX_IPFS_HASH_LEN)?;
        check_len("sha256_hash", &self.sha256_hash, MAX_SHA256_HASH_LEN)?;
        Ok(())
    }

    pub(crate) fn write(&self, w: &mut WireWriter) -> BlogResult<()> {
        w.string("title", &self.title)?;
        w.string("ipfs_hash", &self.ipfs_hash)?;
        w.string("sha256_hash", &self.sha256_hash)?;
        Ok(())
    }

    pub(crate) fn read(r: &mut WireReader<'_>) -> BlogResult<Self> {
        Ok(Self {
            title: r.string("title")?,
            ipfs_hash: r.string("ipfs_hash")?,
            sha256_hash: r.string("sha256_hash")?,
        })
    }
}

pub(crate) fn check_len(field: &'static str, value: &str, limit: usize) -> BlogResult<()> {
    if value.len() > limit {
        return Err(BlogError::field_too_long(field, limit, value.len()));
    }
    Ok(())
}

/// A decoded blog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogState {
    pub owner: Pubkey,
    pub fields: BlogFields,
}

impl BlogState {
    /// Largest encoded record, excluding the discriminator.
    pub const INIT_SPACE: usize = PUBKEY_LEN
        + LEN_PREFIX
        + MAX_TITLE_LEN
        + LEN_PREFIX
        + MAX_IPFS_HASH_LEN
        + LEN_PREFIX
        + MAX_SHA256_HASH_LEN;

    /// Bytes the program allocates per record.
    pub const ACCOUNT_SPACE: usize = DISCRIMINATOR_LEN + Self::INIT_SPACE;

    pub fn new(owner: Pubkey, fields: BlogFields) -> Self {
        Self { owner, fields }
    }

    pub fn title(&self) -> &str {
        &self.fields.title
    }

    pub fn ipfs_hash(&self) -> &str {
        &self.fields.ipfs_hash
    }

    pub fn sha256_hash(&self) -> &str {
        &self.fields.sha256_hash
    }

    /// Decode raw account data.
    ///
    /// Safe on arbitrary input: errors instead of panicking, and ignores any
    /// bytes after the last field (the zero padding of a fixed-size account).
    pub fn decode(raw: &[u8]) -> BlogResult<Self> {
        let mut r = WireReader::new(raw);
        r.expect_discriminator(&BLOG_STATE_DISCRIMINATOR)?;
        let owner = r.pubkey("owner")?;
        let fields = BlogFields::read(&mut r)?;
        Ok(Self { owner, fields })
    }

    /// Encode exactly as the program stores it, padded to `ACCOUNT_SPACE`.
    pub fn pack(&self) -> BlogResult<Vec<u8>> {
        self.fields.validate()?;
        let mut w = WireWriter::with_capacity(Self::ACCOUNT_SPACE);
        w.discriminator(&BLOG_STATE_DISCRIMINATOR).pubkey(&self.owner);
        self.fields.write(&mut w)?;
        w.pad_to(Self::ACCOUNT_SPACE);
        Ok(w.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn sample() -> BlogState {
        BlogState::new(
            Pubkey::new_from_array([9u8; 32]),
            BlogFields::new("Hello", "Qm1", "deadbeef"),
        )
    }

    #[test]
    fn account_space_matches_program_allocation() {
        assert_eq!(BlogState::INIT_SPACE, 204);
        assert_eq!(BlogState::ACCOUNT_SPACE, 212);
    }

    #[test]
    fn pack_layout() {
        let bytes = sample().pack().unwrap();
        assert_eq!(bytes.len(), BlogState::ACCOUNT_SPACE);
        assert_eq!(&bytes[..8], &BLOG_STATE_DISCRIMINATOR);
        assert_eq!(&bytes[8..40], &[9u8; 32]);
        assert_eq!(&bytes[40..44], &5u32.to_le_bytes());
        assert_eq!(&bytes[44..49], b"Hello");
        assert_eq!(&bytes[49..53], &3u32.to_le_bytes());
        assert_eq!(&bytes[53..56], b"Qm1");
        assert_eq!(&bytes[56..60], &8u32.to_le_bytes());
        assert_eq!(&bytes[60..68], b"deadbeef");
        assert!(bytes[68..].iter().all(|b| *b == 0));
    }

    #[test]
    fn decode_packed_account() {
        let state = sample();
        assert_eq!(BlogState::decode(&state.pack().unwrap()).unwrap(), state);
    }

    #[test]
    fn decode_without_padding() {
        let state = sample();
        let packed = state.pack().unwrap();
        assert_eq!(BlogState::decode(&packed[..68]).unwrap(), state);
    }

    #[test]
    fn short_input_fails() {
        assert_matches!(
            BlogState::decode(&[244, 86, 195]),
            Err(BlogError::TruncatedRecord { field: "discriminator", needed: 8, remaining: 3 })
        );
        assert_matches!(BlogState::decode(&[]), Err(BlogError::TruncatedRecord { .. }));
    }

    #[test]
    fn foreign_discriminator_fails() {
        let mut bytes = sample().pack().unwrap();
        bytes[0] ^= 0xff;
        assert_matches!(BlogState::decode(&bytes), Err(BlogError::UnknownDiscriminator { .. }));
    }

    #[test]
    fn truncated_owner_fails() {
        let bytes = sample().pack().unwrap();
        assert_matches!(
            BlogState::decode(&bytes[..20]),
            Err(BlogError::TruncatedRecord { field: "owner", needed: 32, remaining: 12 })
        );
    }

    #[test]
    fn lying_length_prefix_fails() {
        let mut bytes = sample().pack().unwrap();
        bytes[40..44].copy_from_slice(&1000u32.to_le_bytes());
        assert_matches!(
            BlogState::decode(&bytes),
            Err(BlogError::TruncatedRecord { field: "title", needed: 1000, .. })
        );
    }

    #[test]
    fn bad_utf8_fails() {
        let mut bytes = sample().pack().unwrap();
        bytes[44] = 0xff;
        assert_matches!(BlogState::decode(&bytes), Err(BlogError::InvalidUtf8 { field: "title" }));
    }

    #[test]
    fn decode_does_not_touch_input() {
        let bytes = sample().pack().unwrap();
        let copy = bytes.clone();
        let _ = BlogState::decode(&bytes);
        assert_eq!(bytes, copy);
    }

    #[test]
    fn limits_are_in_bytes_not_chars() {
        // 11 three-byte chars = 33 bytes
        let fields = BlogFields::new("€".repeat(11), "", "");
        assert_matches!(
            fields.validate(),
            Err(BlogError::FieldTooLong { field: "title", limit: 32, actual: 33 })
        );
    }

    proptest! {
        #[test]
        fn decode_never_panics(raw in proptest::collection::vec(any::<u8>(), 0..300)) {
            let _ = BlogState::decode(&raw);
        }

        #[test]
        fn decode_with_valid_tag_never_panics(tail in proptest::collection::vec(any::<u8>(), 0..300)) {
            let mut raw = BLOG_STATE_DISCRIMINATOR.to_vec();
            raw.extend(tail);
            let _ = BlogState::decode(&raw);
        }

        #[test]
        fn valid_records_survive_the_account_layout(
            owner in any::<[u8; 32]>(),
            title in "[ -~]{0,32}",
            ipfs in "[a-zA-Z0-9]{0,64}",
            sha in "[0-9a-f]{0,64}",
        ) {
            let state = BlogState::new(Pubkey::new_from_array(owner), BlogFields::new(title, ipfs, sha));
            prop_assert_eq!(BlogState::decode(&state.pack().unwrap()).unwrap(), state);
        }
    }
}
