// src/consts.rs
//! Shared constants — security parameters and defaults

/// Envelope format version written as the first byte of every encrypted file
pub const ENVELOPE_VERSION: u8 = 0x01;

/// 256-bit symmetric vault key
pub const KEY_LEN: usize = 32;

/// XChaCha20-Poly1305 nonce — 24 bytes, safe to generate randomly
pub const NONCE_LEN: usize = 24;

/// Poly1305 authentication tag appended to the ciphertext
pub const TAG_LEN: usize = 16;

/// Smallest envelope that can possibly be valid (empty plaintext)
pub const MIN_ENVELOPE_LEN: usize = 1 + NONCE_LEN + TAG_LEN;

/// Extension marking a file as vault-encrypted
pub const VAULT_SUFFIX: &str = "enc";

/// Extension of staged files written during key rotation
pub const STAGED_SUFFIX: &str = "staged";

/// Default key filename when no config or flag supplies one
pub const DEFAULT_KEY_FILENAME: &str = "vault.key";
