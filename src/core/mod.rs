// src/core/mod.rs
pub mod batch;
pub mod crypto;
pub mod file;
pub mod key;
pub mod rotation;
pub mod util;

pub use batch::*;
pub use crypto::{CipherEngine, Envelope};
pub use file::*;
pub use key::*;
pub use rotation::*;

pub type Result<T> = std::result::Result<T, crate::error::VaultError>;
