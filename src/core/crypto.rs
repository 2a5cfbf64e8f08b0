// src/core/crypto.rs
//! Pure cryptographic primitives — no I/O
//!
//! This module contains only the raw seal/open logic over in-memory
//! buffers, plus the versioned envelope format.
//!
//! # Wire format
//!
//! `[version: 1 byte][nonce: 24 bytes][ciphertext || tag: N + 16 bytes]`
//!
//! Unknown version bytes are rejected before any cryptographic work.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;

use crate::aliases::VaultKey32;
use crate::consts::{ENVELOPE_VERSION, MIN_ENVELOPE_LEN, NONCE_LEN};
use crate::error::VaultError;

pub type Result<T> = std::result::Result<T, VaultError>;

/// Versioned binary envelope holding one sealed payload.
///
/// `body` is the AEAD output: ciphertext with the 16-byte Poly1305 tag
/// appended. The tag is verified in constant time before any plaintext
/// is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub version: u8,
    pub nonce: [u8; NONCE_LEN],
    pub body: Vec<u8>,
}

impl Envelope {
    /// Serialize contiguously: `[version][nonce][body]`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + NONCE_LEN + self.body.len());
        out.push(self.version);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.body);
        out
    }

    /// Parse an encoded envelope, rejecting truncated input and unknown
    /// version bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_ENVELOPE_LEN {
            return Err(VaultError::Format(format!(
                "truncated: {} bytes, need at least {MIN_ENVELOPE_LEN}",
                data.len()
            )));
        }
        let version = data[0];
        if version != ENVELOPE_VERSION {
            return Err(VaultError::Format(format!(
                "unsupported version byte 0x{version:02x}"
            )));
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&data[1..1 + NONCE_LEN]);
        Ok(Envelope {
            version,
            nonce,
            body: data[1 + NONCE_LEN..].to_vec(),
        })
    }
}

/// Authenticated encryption engine bound to exactly one key.
///
/// Holds only the keyed cipher state; the raw key bytes stay inside the
/// caller's [`VaultKey32`] and zeroize on drop. Stateless across calls
/// and safe to share between threads — every `seal` draws its own nonce.
#[derive(Clone)]
pub struct CipherEngine {
    cipher: XChaCha20Poly1305,
}

impl CipherEngine {
    pub fn new(key: &VaultKey32) -> Self {
        Self {
            cipher: XChaCha20Poly1305::new(key.expose_secret().into()),
        }
    }

    /// Encrypt `plaintext` under a fresh random nonce.
    ///
    /// Succeeds for any input size, including empty. `aad` is
    /// authenticated but not encrypted; pass `&[]` for none.
    pub fn seal(&self, plaintext: &[u8], aad: &[u8]) -> Result<Envelope> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = XNonce::from(nonce_bytes);

        let body = self
            .cipher
            .encrypt(
                &nonce,
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|e| VaultError::Cipher(e.to_string()))?;

        Ok(Envelope {
            version: ENVELOPE_VERSION,
            nonce: nonce_bytes,
            body,
        })
    }

    /// Verify and decrypt a sealed envelope.
    ///
    /// Fails with [`VaultError::Authentication`] on any tag mismatch —
    /// wrong key, tampered ciphertext, or wrong `aad`. No partial
    /// plaintext is ever returned.
    pub fn open(&self, envelope: &Envelope, aad: &[u8]) -> Result<Vec<u8>> {
        let nonce = XNonce::from(envelope.nonce);
        self.cipher
            .decrypt(
                &nonce,
                Payload {
                    msg: &envelope.body,
                    aad,
                },
            )
            .map_err(|_| VaultError::Authentication)
    }
}
