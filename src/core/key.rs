// src/core/key.rs
//! Key lifecycle — generation, persistence, loading, rotation
//!
//! The key store is the sole owner of key material on disk: a single
//! file holding the raw 32 key bytes, no header. Key bytes never appear
//! in logs; use [`key_fingerprint`](crate::core::util::key_fingerprint)
//! for display.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use secure_gate::RandomBytes;

use crate::aliases::{SecureRandomExt, VaultKey32};
use crate::consts::KEY_LEN;
use crate::core::util::{key_fingerprint, write_atomic};
use crate::core::Result;
use crate::error::VaultError;

/// Handle to the designated key-storage location.
#[derive(Debug, Clone)]
pub struct KeyStore {
    location: PathBuf,
}

impl KeyStore {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Generate a fresh random 256-bit key from the OS CSPRNG.
    #[inline]
    pub fn generate() -> VaultKey32 {
        VaultKey32::new(*RandomBytes::<KEY_LEN>::new().expose_secret())
    }

    /// Persist `key` at the store location, atomically.
    ///
    /// Overwrites any existing key — the caller must guarantee that is
    /// intentional, because ciphertexts under the old key become
    /// undecryptable once it is gone.
    pub fn save(&self, key: &VaultKey32) -> Result<()> {
        if let Some(parent) = self.location.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        write_atomic(&self.location, key.expose_secret())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.location, fs::Permissions::from_mode(0o600))?;
        }

        info!(
            path = %self.location.display(),
            fingerprint = %key_fingerprint(key),
            "key saved"
        );
        Ok(())
    }

    /// Load the persisted key.
    pub fn load(&self) -> Result<VaultKey32> {
        if !self.location.exists() {
            return Err(VaultError::NotFound(self.location.clone()));
        }
        let bytes = fs::read(&self.location)?;
        if bytes.len() != KEY_LEN {
            return Err(VaultError::CorruptKey {
                expected: KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut raw = [0u8; KEY_LEN];
        raw.copy_from_slice(&bytes);
        Ok(VaultKey32::new(raw))
    }

    /// Generate a new key and persist it, replacing the old one.
    ///
    /// Does NOT touch previously encrypted files — they must be
    /// re-encrypted separately or they become permanently undecryptable.
    /// For the guarded variant see
    /// [`rotate_with_reencryption`](crate::core::rotation::rotate_with_reencryption).
    pub fn rotate(&self) -> Result<VaultKey32> {
        let key = Self::generate();
        self.save(&key)?;
        Ok(key)
    }
}
