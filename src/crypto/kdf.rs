//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The salt and iteration count are application-wide constants, so the
//! same passphrase always yields the same key.  There is no per-vault
//! salt and nothing here can tell a wrong passphrase from a right one.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use super::keys::{DerivedKey, KEY_LEN};

/// Salt shared by every vault.
pub const SALT: &[u8] = b"account_manager_salt";

/// PBKDF2 iteration count.
pub const ITERATIONS: u32 = 100_000;

/// Derive the 32-byte session key from a master passphrase.
///
/// Cannot fail: every string, including the empty one, maps to a key.
pub fn derive_key(passphrase: &str) -> DerivedKey {
    DerivedKey::from_bytes(derive_key_with(passphrase.as_bytes(), SALT, ITERATIONS))
}

/// Run PBKDF2-HMAC-SHA256 with explicit salt and iteration count.
pub fn derive_key_with(password: &[u8], salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    key
}
