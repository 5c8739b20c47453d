//! The per-session derived key.

use zeroize::Zeroize;

/// Length of the derived key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// A 32-byte key derived from the master passphrase.
///
/// Held exclusively by the session that derived it and never written to
/// storage.  The bytes are zeroed when the key is dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Key bytes repeated end-to-end, truncated to `len`.
    pub(crate) fn keystream(&self, len: usize) -> impl Iterator<Item = u8> + '_ {
        self.bytes.iter().copied().cycle().take(len)
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}
