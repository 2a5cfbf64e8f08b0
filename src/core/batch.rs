// src/core/batch.rs
//! Directory-level batch processing
//!
//! A batch is a sweep over a directory's files, each transformed
//! independently. One file's failure never aborts the batch: the
//! outcome is recorded and processing continues, so a single corrupted
//! ciphertext cannot block recovery of its siblings.
//!
//! Files are classified by the vault suffix alone, never by content
//! inspection, and processed in lexicographic path order so the result
//! is reproducible for identical directory contents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::consts::VAULT_SUFFIX;
use crate::core::crypto::CipherEngine;
use crate::core::file::{decrypt_file, encrypt_file};
use crate::core::Result;
use crate::error::VaultError;

/// Which transform a batch applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Batch policy knobs. Both default to the original tool's behaviour:
/// direct entries only, originals removed after a verified transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Descend into subdirectories. Off by default — recursion is an
    /// explicit opt-in policy.
    pub recursive: bool,
    /// Remove each source file after its transform succeeds. Removal
    /// happens per file, immediately after that file's success, never
    /// speculatively and never batched.
    pub remove_source: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            remove_source: true,
        }
    }
}

/// One unit of work: transform `source` into `destination`.
#[derive(Debug, Clone, Serialize)]
pub struct FileTask {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failed,
}

/// Immutable record of one task's result.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub task: FileTask,
    pub status: OutcomeStatus,
    /// Human-readable error detail when `status` is `Failed`.
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Aggregated per-file outcomes of one directory sweep.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub outcomes: Vec<FileOutcome>,
    pub succeeded: usize,
    pub failed: usize,
}

/// True if `path` carries the vault's encrypted-file marker.
pub fn has_vault_suffix(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(VAULT_SUFFIX))
        .unwrap_or(false)
}

/// Destination for encrypting `path`: the same name with the vault
/// suffix appended (`notes.txt` → `notes.txt.enc`).
pub fn encrypted_destination(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(VAULT_SUFFIX);
    PathBuf::from(name)
}

/// Destination for decrypting `path`: the name with the vault suffix
/// stripped (`notes.txt.enc` → `notes.txt`).
pub fn decrypted_destination(path: &Path) -> PathBuf {
    path.with_extension("")
}

/// Enumerate eligible files and apply the transform to each, collecting
/// per-file outcomes.
///
/// Fails only for directory-level problems (`NotADirectory`, unreadable
/// listing). Individual file errors become failed outcomes.
pub fn process_directory(
    directory: &Path,
    direction: Direction,
    engine: &CipherEngine,
    options: &BatchOptions,
) -> Result<BatchResult> {
    if !directory.is_dir() {
        return Err(VaultError::NotADirectory(directory.to_path_buf()));
    }

    let tasks = scan_directory(directory, direction, options)?;
    info!(
        directory = %directory.display(),
        ?direction,
        selected = tasks.len(),
        "batch started"
    );

    let mut outcomes = Vec::with_capacity(tasks.len());
    let mut succeeded = 0;
    let mut failed = 0;

    for task in tasks {
        match run_task(&task, engine, options) {
            Ok(()) => {
                succeeded += 1;
                debug!(source = %task.source.display(), "batch entry done");
                outcomes.push(FileOutcome {
                    task,
                    status: OutcomeStatus::Success,
                    error: None,
                });
            }
            Err(err) => {
                failed += 1;
                warn!(source = %task.source.display(), %err, "batch entry failed");
                outcomes.push(FileOutcome {
                    task,
                    status: OutcomeStatus::Failed,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    info!(succeeded, failed, "batch finished");
    Ok(BatchResult {
        outcomes,
        succeeded,
        failed,
    })
}

/// Build the ordered task list for one sweep. Selection is by suffix:
/// encrypt takes unmarked regular files, decrypt takes marked ones.
fn scan_directory(
    directory: &Path,
    direction: Direction,
    options: &BatchOptions,
) -> Result<Vec<FileTask>> {
    let mut files: Vec<PathBuf> = if options.recursive {
        WalkDir::new(directory)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect()
    } else {
        let mut direct = Vec::new();
        for entry in fs::read_dir(directory)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                direct.push(entry.path());
            }
        }
        direct
    };
    files.sort();

    Ok(files
        .into_iter()
        .filter(|path| match direction {
            Direction::Encrypt => !has_vault_suffix(path),
            Direction::Decrypt => has_vault_suffix(path),
        })
        .map(|source| {
            let destination = match direction {
                Direction::Encrypt => encrypted_destination(&source),
                Direction::Decrypt => decrypted_destination(&source),
            };
            FileTask {
                source,
                destination,
                direction,
            }
        })
        .collect())
}

fn run_task(task: &FileTask, engine: &CipherEngine, options: &BatchOptions) -> Result<()> {
    match task.direction {
        Direction::Encrypt => encrypt_file(&task.source, &task.destination, engine)?,
        Direction::Decrypt => decrypt_file(&task.source, &task.destination, engine)?,
    };

    // Remove the original only now, with this file's destination durably
    // in place. A failed removal leaves a stray copy but the transform
    // itself stands, so the outcome stays a success.
    if options.remove_source {
        if let Err(err) = fs::remove_file(&task.source) {
            warn!(source = %task.source.display(), %err, "source not removed");
        }
    }
    Ok(())
}
