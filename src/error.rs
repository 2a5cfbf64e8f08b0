// src/error.rs
//! Public error type for the entire crate

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    /// Source file or key file does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Batch target is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Key file exists but holds the wrong number of bytes.
    #[error("corrupt key file: expected {expected} bytes, got {actual}")]
    CorruptKey { expected: usize, actual: usize },

    /// Envelope version or structure unrecognized.
    #[error("invalid envelope: {0}")]
    Format(String),

    /// Tag verification failed — wrong key or tampered/corrupted ciphertext.
    #[error("authentication failed: wrong key or tampered ciphertext")]
    Authentication,

    /// Encryption-side cipher failure (practically unreachable for XChaCha20).
    #[error("cipher error: {0}")]
    Cipher(String),

    /// A rotation was rolled back; the old key remains persisted.
    #[error("rotation aborted at {}: {}", .file.display(), .source)]
    RotationAborted {
        file: PathBuf,
        #[source]
        source: Box<VaultError>,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

impl VaultError {
    /// True for errors the user can remediate (bad path, wrong key, bad
    /// config) as opposed to system-level failures. The CLI maps this to
    /// distinct exit codes.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, VaultError::Io(_) | VaultError::Cipher(_))
    }
}
