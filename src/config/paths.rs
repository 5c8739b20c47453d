//! Per-user application paths.

use std::path::PathBuf;

use crate::errors::{Result, VaultError};

/// Directory under the user's home that holds the vault.
pub const APP_DIR_NAME: &str = "AccountManager";

/// Default file name of the vault database.
pub const DEFAULT_VAULT_FILE: &str = "accounts.db";

/// `~/AccountManager`
pub fn default_app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(VaultError::NoHomeDirectory)?;
    Ok(home.join(APP_DIR_NAME))
}

/// `~/AccountManager/accounts.db`
pub fn default_vault_path() -> Result<PathBuf> {
    Ok(default_app_dir()?.join(DEFAULT_VAULT_FILE))
}
