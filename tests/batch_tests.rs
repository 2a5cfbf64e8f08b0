// tests/batch_tests.rs
mod common;

use std::fs;
use std::path::Path;

use secure_file_vault::{
    encrypt_file, process_directory, BatchOptions, CipherEngine, Direction, KeyStore, VaultError,
};
use tempfile::tempdir;

fn seed_plain(dir: &Path, name: &str, contents: &[u8]) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_encrypt_directory_transforms_and_removes_originals() {
    common::setup();
    let dir = tempdir().unwrap();
    seed_plain(dir.path(), "a.txt", b"alpha");
    seed_plain(dir.path(), "b.txt", b"beta");

    let engine = CipherEngine::new(&KeyStore::generate());
    let result = process_directory(
        dir.path(),
        Direction::Encrypt,
        &engine,
        &BatchOptions::default(),
    )
    .unwrap();

    assert_eq!(result.succeeded, 2);
    assert_eq!(result.failed, 0);
    assert!(dir.path().join("a.txt.enc").exists());
    assert!(dir.path().join("b.txt.enc").exists());
    assert!(!dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn test_encrypt_then_decrypt_directory_roundtrip() {
    let dir = tempdir().unwrap();
    seed_plain(dir.path(), "doc.txt", b"round and round");

    let engine = CipherEngine::new(&KeyStore::generate());
    let opts = BatchOptions::default();
    process_directory(dir.path(), Direction::Encrypt, &engine, &opts).unwrap();
    process_directory(dir.path(), Direction::Decrypt, &engine, &opts).unwrap();

    assert_eq!(fs::read(dir.path().join("doc.txt")).unwrap(), b"round and round");
    assert!(!dir.path().join("doc.txt.enc").exists());
}

#[test]
fn test_reencrypting_marked_directory_selects_nothing() {
    let dir = tempdir().unwrap();
    seed_plain(dir.path(), "x.txt", b"x");

    let engine = CipherEngine::new(&KeyStore::generate());
    let opts = BatchOptions::default();
    process_directory(dir.path(), Direction::Encrypt, &engine, &opts).unwrap();

    // Every file now carries the marker, so a second sweep is a no-op.
    let again = process_directory(dir.path(), Direction::Encrypt, &engine, &opts).unwrap();
    assert!(again.outcomes.is_empty());
}

#[test]
fn test_one_corrupted_file_does_not_abort_the_batch() {
    common::setup();
    let dir = tempdir().unwrap();
    seed_plain(dir.path(), "a.txt", b"alpha");
    seed_plain(dir.path(), "b.txt", b"bravo");
    seed_plain(dir.path(), "c.txt", b"charlie");

    let engine = CipherEngine::new(&KeyStore::generate());
    let opts = BatchOptions::default();
    process_directory(dir.path(), Direction::Encrypt, &engine, &opts).unwrap();

    // Corrupt b's ciphertext body.
    let b_enc = dir.path().join("b.txt.enc");
    let mut bytes = fs::read(&b_enc).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    fs::write(&b_enc, &bytes).unwrap();

    let result = process_directory(dir.path(), Direction::Decrypt, &engine, &opts).unwrap();

    assert_eq!(result.succeeded, 2);
    assert_eq!(result.failed, 1);
    assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"alpha");
    assert_eq!(fs::read(dir.path().join("c.txt")).unwrap(), b"charlie");
    // The corrupted ciphertext is kept for recovery attempts.
    assert!(b_enc.exists());
    assert!(!dir.path().join("b.txt").exists());

    let failed: Vec<_> = result.outcomes.iter().filter(|o| !o.is_success()).collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].task.source.ends_with("b.txt.enc"));
    assert!(failed[0].error.as_deref().unwrap().contains("authentication"));
}

#[test]
fn test_outcomes_are_lexicographically_ordered() {
    let dir = tempdir().unwrap();
    seed_plain(dir.path(), "zeta.txt", b"z");
    seed_plain(dir.path(), "alpha.txt", b"a");
    seed_plain(dir.path(), "mid.txt", b"m");

    let engine = CipherEngine::new(&KeyStore::generate());
    let result = process_directory(
        dir.path(),
        Direction::Encrypt,
        &engine,
        &BatchOptions::default(),
    )
    .unwrap();

    let sources: Vec<_> = result
        .outcomes
        .iter()
        .map(|o| o.task.source.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(sources, vec!["alpha.txt", "mid.txt", "zeta.txt"]);
}

#[test]
fn test_non_directory_target_is_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, b"not a dir").unwrap();

    let engine = CipherEngine::new(&KeyStore::generate());
    let result = process_directory(
        &file,
        Direction::Encrypt,
        &engine,
        &BatchOptions::default(),
    );
    assert!(matches!(result, Err(VaultError::NotADirectory(_))));
}

#[test]
fn test_keep_originals_option() {
    let dir = tempdir().unwrap();
    seed_plain(dir.path(), "a.txt", b"alpha");

    let engine = CipherEngine::new(&KeyStore::generate());
    let opts = BatchOptions {
        remove_source: false,
        ..BatchOptions::default()
    };
    process_directory(dir.path(), Direction::Encrypt, &engine, &opts).unwrap();

    assert!(dir.path().join("a.txt").exists());
    assert!(dir.path().join("a.txt.enc").exists());
}

#[test]
fn test_decrypt_selects_only_marked_files() {
    let dir = tempdir().unwrap();
    seed_plain(dir.path(), "plain.txt", b"left alone");

    let engine = CipherEngine::new(&KeyStore::generate());
    seed_plain(dir.path(), "secret.txt", b"hidden");
    encrypt_file(
        &dir.path().join("secret.txt"),
        &dir.path().join("secret.txt.enc"),
        &engine,
    )
    .unwrap();
    fs::remove_file(dir.path().join("secret.txt")).unwrap();

    let result = process_directory(
        dir.path(),
        Direction::Decrypt,
        &engine,
        &BatchOptions::default(),
    )
    .unwrap();

    assert_eq!(result.outcomes.len(), 1);
    assert_eq!(fs::read(dir.path().join("plain.txt")).unwrap(), b"left alone");
    assert_eq!(fs::read(dir.path().join("secret.txt")).unwrap(), b"hidden");
}

#[test]
fn test_recursion_is_opt_in() {
    let dir = tempdir().unwrap();
    seed_plain(dir.path(), "top.txt", b"top");
    fs::create_dir(dir.path().join("sub")).unwrap();
    seed_plain(&dir.path().join("sub"), "nested.txt", b"nested");

    let engine = CipherEngine::new(&KeyStore::generate());

    let flat = process_directory(
        dir.path(),
        Direction::Encrypt,
        &engine,
        &BatchOptions {
            remove_source: false,
            ..BatchOptions::default()
        },
    )
    .unwrap();
    assert_eq!(flat.outcomes.len(), 1);
    assert!(!dir.path().join("sub/nested.txt.enc").exists());

    let deep = process_directory(
        dir.path(),
        Direction::Encrypt,
        &engine,
        &BatchOptions {
            recursive: true,
            remove_source: false,
        },
    )
    .unwrap();
    // top.txt.enc from the first sweep is skipped; top.txt and nested.txt match.
    assert_eq!(deep.outcomes.len(), 2);
    assert!(dir.path().join("sub/nested.txt.enc").exists());
}
