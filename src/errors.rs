use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in AcctVault.
///
/// A secret that fails to decode is *not* an error here: it is carried as a
/// [`crate::crypto::DecryptionFailure`] value inside the record so listings
/// keep going.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Session errors ---
    #[error("Cannot initialize vault at {}: {reason}", .path.display())]
    Initialization { path: PathBuf, reason: String },

    #[error("Could not determine the home directory — pass --vault-dir")]
    NoHomeDirectory,

    // --- Record errors ---
    #[error("Record {0} not found")]
    RecordNotFound(i64),

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    // --- Migration errors ---
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl VaultError {
    /// Build an `Initialization` error for the storage file at `path`.
    pub(crate) fn init(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::Initialization {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for AcctVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
