//! Cryptographic primitives for AcctVault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 passphrase key derivation (`kdf`)
//! - The session `DerivedKey` (`keys`)
//! - The keystream XOR codec applied to stored secrets (`cipher`)

pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encode, decode, derive_key, ...};
pub use cipher::{decode, encode, DecryptionFailure};
pub use kdf::derive_key;
pub use keys::DerivedKey;
