// src/core/rotation.rs
//! Safe key rotation with re-encryption
//!
//! [`KeyStore::rotate`](crate::core::key::KeyStore::rotate) alone
//! replaces the key and strands every existing ciphertext. This module
//! is the guarded path: every listed file is re-encrypted under the new
//! key into a staged sibling first, and only when all of them are
//! staged does the rotation commit. Any failure rolls the whole thing
//! back — staged files discarded, old key untouched. A half-rotated
//! vault is the failure mode this module exists to prevent.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::aliases::PlainText;
use crate::consts::STAGED_SUFFIX;
use crate::core::crypto::{CipherEngine, Envelope};
use crate::core::key::KeyStore;
use crate::core::util::{key_fingerprint, write_atomic};
use crate::core::Result;
use crate::error::VaultError;

/// Summary of a committed rotation.
#[derive(Debug, Clone)]
pub struct RotationReport {
    /// Files now encrypted under the new key, in processing order.
    pub reencrypted: Vec<PathBuf>,
    /// Fingerprint of the newly persisted key.
    pub new_key_fingerprint: String,
}

/// Rotate the persisted key, re-encrypting `files` under the new key.
///
/// All-or-nothing: if any file fails, staged copies are discarded, the
/// old key remains persisted, and the error names the failing file. An
/// empty `files` list degrades to a plain key replacement through the
/// same commit path.
pub fn rotate_with_reencryption(store: &KeyStore, files: &[PathBuf]) -> Result<RotationReport> {
    let old_key = store.load()?;
    let new_key = KeyStore::generate();
    let old_engine = CipherEngine::new(&old_key);
    let new_engine = CipherEngine::new(&new_key);
    let fingerprint = key_fingerprint(&new_key);

    // Stage every file before touching anything the vault trusts.
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());
    for file in files {
        let stage = staged_path(file);
        match restage(file, &stage, &old_engine, &new_engine) {
            Ok(()) => staged.push((file.clone(), stage)),
            Err(err) => {
                discard_staged(&staged);
                warn!(file = %file.display(), %err, "rotation rolled back");
                return Err(VaultError::RotationAborted {
                    file: file.clone(),
                    source: Box::new(err),
                });
            }
        }
    }

    // Commit, key first: if the process dies during the renames below,
    // every not-yet-renamed original still has its staged sibling on
    // disk under the persisted key, so nothing is stranded.
    if let Err(err) = store.save(&new_key) {
        discard_staged(&staged);
        return Err(err);
    }
    for (original, stage) in &staged {
        fs::rename(stage, original)?;
    }

    info!(
        files = staged.len(),
        fingerprint = %fingerprint,
        "rotation committed"
    );
    Ok(RotationReport {
        reencrypted: staged.into_iter().map(|(original, _)| original).collect(),
        new_key_fingerprint: fingerprint,
    })
}

/// Decrypt `source` under the old key and seal it under the new key
/// into the staged sibling. Never touches `source` itself.
fn restage(
    source: &Path,
    stage: &Path,
    old_engine: &CipherEngine,
    new_engine: &CipherEngine,
) -> Result<()> {
    if !source.exists() {
        return Err(VaultError::NotFound(source.to_path_buf()));
    }
    let raw = fs::read(source)?;
    let envelope = Envelope::decode(&raw)?;
    let plaintext = PlainText::new(old_engine.open(&envelope, &[])?);
    let resealed = new_engine.seal(plaintext.expose_secret(), &[])?;
    write_atomic(stage, &resealed.encode())?;
    Ok(())
}

fn staged_path(file: &Path) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(".");
    name.push(STAGED_SUFFIX);
    PathBuf::from(name)
}

fn discard_staged(staged: &[(PathBuf, PathBuf)]) {
    for (_, stage) in staged {
        if let Err(err) = fs::remove_file(stage) {
            warn!(stage = %stage.display(), %err, "staged file not removed");
        }
    }
}
