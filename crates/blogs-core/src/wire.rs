//! Length-prefixed wire codec.
//!
//! The blogs program speaks Borsh-style framing: fixed 8-byte discriminators,
//! raw 32-byte keys, and strings as a little-endian `u32` byte length followed
//! by the UTF-8 bytes (no terminator, no padding).
//!
//! `WireWriter` and `WireReader` are the only places that track offsets.
//! Both the instruction codec and the account codec go through them.

use solana_program::pubkey::Pubkey;

use crate::errors::{BlogError, BlogResult};

pub const DISCRIMINATOR_LEN: usize = 8;
pub const LEN_PREFIX: usize = 4;
pub const PUBKEY_LEN: usize = 32;

/// Encoded size of a length-prefixed string.
pub fn string_len(s: &str) -> usize {
    LEN_PREFIX + s.len()
}

/// Append-only encoder.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn with_capacity(cap: usize) -> Self {
        Self { buf: Vec::with_capacity(cap) }
    }

    pub fn discriminator(&mut self, tag: &[u8; DISCRIMINATOR_LEN]) -> &mut Self {
        self.buf.extend_from_slice(tag);
        self
    }

    pub fn pubkey(&mut self, key: &Pubkey) -> &mut Self {
        self.buf.extend_from_slice(key.as_ref());
        self
    }

    /// Write `s` with a `u32` LE length prefix.
    ///
    /// Fails only if the string cannot be described by a `u32` length.
    pub fn string(&mut self, field: &'static str, s: &str) -> BlogResult<&mut Self> {
        let len = u32::try_from(s.len())
            .map_err(|_| BlogError::field_too_long(field, u32::MAX as usize, s.len()))?;
        self.buf.extend_from_slice(&len.to_le_bytes());
        self.buf.extend_from_slice(s.as_bytes());
        Ok(self)
    }

    /// Zero-fill up to `total` bytes. No-op when already at or past `total`.
    pub fn pad_to(&mut self, total: usize) -> &mut Self {
        if self.buf.len() < total {
            self.buf.resize(total, 0);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Bounds-checked cursor over untrusted bytes.
///
/// Every read checks the remaining length first; a length prefix larger than
/// the rest of the input is reported as `TruncatedRecord`, never trusted.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, field: &'static str, n: usize) -> BlogResult<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(BlogError::TruncatedRecord { field, needed: n, remaining });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn discriminator(&mut self) -> BlogResult<[u8; DISCRIMINATOR_LEN]> {
        let mut tag = [0u8; DISCRIMINATOR_LEN];
        tag.copy_from_slice(self.take("discriminator", DISCRIMINATOR_LEN)?);
        Ok(tag)
    }

    /// Read a discriminator and require it to equal `expected`.
    pub fn expect_discriminator(&mut self, expected: &[u8; DISCRIMINATOR_LEN]) -> BlogResult<()> {
        let found = self.discriminator()?;
        if &found != expected {
            return Err(BlogError::UnknownDiscriminator { found });
        }
        Ok(())
    }

    pub fn pubkey(&mut self, field: &'static str) -> BlogResult<Pubkey> {
        let mut key = [0u8; PUBKEY_LEN];
        key.copy_from_slice(self.take(field, PUBKEY_LEN)?);
        Ok(Pubkey::new_from_array(key))
    }

    pub fn u32_le(&mut self, field: &'static str) -> BlogResult<u32> {
        let mut raw = [0u8; LEN_PREFIX];
        raw.copy_from_slice(self.take(field, LEN_PREFIX)?);
        Ok(u32::from_le_bytes(raw))
    }

    pub fn string(&mut self, field: &'static str) -> BlogResult<String> {
        let len = self.u32_le(field)? as usize;
        let bytes = self.take(field, len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| BlogError::InvalidUtf8 { field })
    }
}
