// src/config.rs
//! Configuration for secure-file-vault
//!
//! A plain value loaded from TOML with built-in defaults. Deliberately
//! not a process-wide global: callers construct one and pass it down,
//! so there is no ambient key location anywhere in the crate.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::consts::DEFAULT_KEY_FILENAME;
use crate::core::batch::BatchOptions;
use crate::error::VaultError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the vault key lives.
    pub key_file: PathBuf,
    /// Default batch policy, overridable per invocation.
    pub batch: BatchOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_file: default_key_file(),
            batch: BatchOptions::default(),
        }
    }
}

impl Config {
    /// Parse a TOML config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, VaultError> {
        if !path.exists() {
            return Err(VaultError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// `<data dir>/secure-file-vault/vault.key`, or `./vault.key` when the
/// platform exposes no data directory.
pub fn default_key_file() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("secure-file-vault").join(DEFAULT_KEY_FILENAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_FILENAME))
}
