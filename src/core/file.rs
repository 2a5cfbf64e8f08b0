// src/core/file.rs
//! File-level encryption/decryption operations
//!
//! This module handles the read → transform → write sequence for a
//! single file, building on the pure crypto primitives from crypto.rs.
//! Destinations are always written through a temporary file in the same
//! directory and renamed into place, so a crash mid-write never leaves
//! a truncated file at a path the vault will later trust.
//!
//! Neither operation deletes its source — deletion is the caller's
//! explicit follow-up once the destination is durably present.

use std::path::Path;

use tracing::debug;

use crate::aliases::PlainText;
use crate::core::crypto::{CipherEngine, Envelope};
use crate::core::util::write_atomic;
use crate::core::Result;
use crate::error::VaultError;

/// Encrypt a file on disk into the vault envelope format.
///
/// Returns the plaintext size in bytes.
pub fn encrypt_file<P: AsRef<Path>>(
    input_path: P,
    output_path: P,
    engine: &CipherEngine,
) -> Result<u64> {
    let input_path = input_path.as_ref();
    if !input_path.exists() {
        return Err(VaultError::NotFound(input_path.to_path_buf()));
    }

    let plaintext = PlainText::new(std::fs::read(input_path)?);
    let envelope = engine.seal(plaintext.expose_secret(), &[])?;
    write_atomic(output_path.as_ref(), &envelope.encode())?;

    debug!(
        input = %input_path.display(),
        output = %output_path.as_ref().display(),
        "encrypted"
    );
    Ok(plaintext.expose_secret().len() as u64)
}

/// Decrypt a vault envelope file on disk.
///
/// Returns the plaintext size in bytes. Propagates `Format` for an
/// unrecognized envelope and `Authentication` for a failed tag check;
/// in both cases the destination is left untouched.
pub fn decrypt_file<P: AsRef<Path>>(
    input_path: P,
    output_path: P,
    engine: &CipherEngine,
) -> Result<u64> {
    let input_path = input_path.as_ref();
    if !input_path.exists() {
        return Err(VaultError::NotFound(input_path.to_path_buf()));
    }

    let raw = std::fs::read(input_path)?;
    let envelope = Envelope::decode(&raw)?;
    let plaintext = PlainText::new(engine.open(&envelope, &[])?);
    write_atomic(output_path.as_ref(), plaintext.expose_secret())?;

    debug!(
        input = %input_path.display(),
        output = %output_path.as_ref().display(),
        "decrypted"
    );
    Ok(plaintext.expose_secret().len() as u64)
}
