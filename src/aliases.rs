// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical types used throughout secure-file-vault.

pub use secure_gate::{dynamic_alias, fixed_alias, SecureConversionsExt, SecureRandomExt};

// Fixed-size secrets
fixed_alias!(VaultKey32, 32); // 256-bit vault key — zeroizes on drop

// Dynamic secrets
dynamic_alias!(PlainText, Vec<u8>); // decrypted file contents in transit
