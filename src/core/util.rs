// src/core/util.rs
//! Small utility functions used across the core module
//!
//! Atomic file writes and key fingerprinting. Keep this light — if it
//! grows, split further.

use std::io::{self, Write};
use std::path::Path;

use crate::aliases::VaultKey32;

/// Write `bytes` to `path` via a temporary file in the same directory,
/// then rename. A crash mid-write never leaves a truncated file at
/// `path`; on failure the temporary file is removed on drop.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Short BLAKE3 fingerprint of key material — the only key-derived value
/// allowed in logs and console output.
pub fn key_fingerprint(key: &VaultKey32) -> String {
    let hash = blake3::hash(key.expose_secret());
    hex::encode(&hash.as_bytes()[..8])
}
