//! Vault session lifecycle.
//!
//! `VaultSession::open` prepares the storage location, derives the key
//! once and hands out a ready [`RecordStore`].  The session owns the
//! connection: `close` consumes it, and dropping an unclosed session
//! releases the connection as well, so every exit path lets go of it.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::debug;

use crate::config::paths;
use crate::crypto::kdf::derive_key;
use crate::errors::{Result, VaultError};

use super::store::RecordStore;

/// A live binding of a derived key to an open storage file.
pub struct VaultSession {
    /// Path to the SQLite file on disk.
    path: PathBuf,

    store: RecordStore,
}

impl VaultSession {
    /// Open the vault at the default per-user location.
    pub fn open(passphrase: &str) -> Result<Self> {
        let path = paths::default_vault_path()?;
        Self::open_at(&path, passphrase)
    }

    /// Open (creating if absent) the vault file at `path`.
    ///
    /// A wrong passphrase is *not* detected here; it only shows up later
    /// as secrets that decode to garbage or fail to decode.
    pub fn open_at(path: &Path, passphrase: &str) -> Result<Self> {
        // 1. Make sure the application directory exists.
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    VaultError::init(path, format!("cannot create directory: {e}"))
                })?;
            }
        }

        // 2. Open or create the database file.
        let conn = Connection::open(path).map_err(|e| VaultError::init(path, e))?;

        // Restrict the vault file to owner-only access.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms)
                .map_err(|e| VaultError::init(path, format!("cannot set permissions: {e}")))?;
        }

        // 3. Derive the session key and bind the store (schema is
        //    created and checked here).
        let key = derive_key(passphrase);
        let store = RecordStore::new(conn, key).map_err(|e| VaultError::init(path, e))?;

        debug!(path = %path.display(), "vault session opened");

        Ok(Self {
            path: path.to_path_buf(),
            store,
        })
    }

    /// The record store for this session.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the storage handle.
    pub fn close(self) -> Result<()> {
        debug!(path = %self.path.display(), "vault session closed");
        self.store.close()
    }
}

