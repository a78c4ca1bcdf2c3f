use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use blogs_core::state::BlogFields;

use crate::args::FieldArgs;

pub fn read_content_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).with_context(|| format!("failed to read content {}", path.display()))
}

/// Digest to store: `--sha256` as given, or SHA-256 of `--content` /
/// `--content-file`, or empty.
pub fn resolve_digest(args: &FieldArgs) -> Result<String> {
    if let Some(hex) = &args.sha256 {
        return Ok(hex.trim().to_ascii_lowercase());
    }
    if let Some(text) = &args.content {
        return Ok(blogs_core::content_digest_hex(text.as_bytes()));
    }
    if let Some(path) = &args.content_file {
        return Ok(blogs_core::content_digest_hex(&read_content_file(path)?));
    }
    Ok(String::new())
}

/// Fields for initialize/update. Title and pointer are required.
pub fn resolve_fields(args: &FieldArgs) -> Result<BlogFields> {
    let title = args.title.clone().ok_or_else(|| anyhow!("--title is required"))?;
    let ipfs_hash = args.ipfs_hash.clone().ok_or_else(|| anyhow!("--ipfs-hash is required"))?;
    if title.trim().is_empty() {
        return Err(anyhow!("--title must not be empty"));
    }
    if ipfs_hash.trim().is_empty() {
        return Err(anyhow!("--ipfs-hash must not be empty"));
    }
    let fields = BlogFields::new(title, ipfs_hash, resolve_digest(args)?);
    fields.validate()?;
    Ok(fields)
}
