use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

use super::paths::DEFAULT_VAULT_FILE;

/// User-level configuration, loaded from `<vault_dir>/config.toml`.
///
/// Every field has a sensible default so AcctVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name of the vault database inside the vault directory.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Show plaintext secrets in listings without `--reveal`.
    #[serde(default)]
    pub reveal_secrets: bool,

    /// Back up an existing vault file before `migrate` overwrites it.
    #[serde(default = "default_backup_on_migrate")]
    pub backup_on_migrate: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    DEFAULT_VAULT_FILE.to_string()
}

fn default_backup_on_migrate() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            reveal_secrets: false,
            backup_on_migrate: default_backup_on_migrate(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the vault directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<vault_dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(vault_dir: &Path) -> Result<Self> {
        let config_path = vault_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.vault_file.is_empty()
            || Path::new(&settings.vault_file).components().count() != 1
        {
            return Err(VaultError::ConfigError(format!(
                "vault_file must be a plain file name (got '{}')",
                settings.vault_file
            )));
        }

        Ok(settings)
    }

    /// Build the full path to the vault database.
    ///
    /// Example: `~/AccountManager/accounts.db`
    pub fn vault_path(&self, vault_dir: &Path) -> PathBuf {
        vault_dir.join(&self.vault_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_file, "accounts.db");
        assert!(!s.reveal_secrets);
        assert!(s.backup_on_migrate);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "accounts.db");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_file = "work.db"
reveal_secrets = true
backup_on_migrate = false
"#;
        fs::write(tmp.path().join("config.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "work.db");
        assert!(settings.reveal_secrets);
        assert!(!settings.backup_on_migrate);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "reveal_secrets = true\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(settings.reveal_secrets);
        // Rest should be defaults
        assert_eq!(settings.vault_file, "accounts.db");
        assert!(settings.backup_on_migrate);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "not valid {{toml").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn load_rejects_nested_vault_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "vault_file = \"../x.db\"\n").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn vault_path_builds_correct_path() {
        let s = Settings::default();
        let dir = Path::new("/home/user/AccountManager");
        assert_eq!(
            s.vault_path(dir),
            PathBuf::from("/home/user/AccountManager/accounts.db")
        );
    }

    #[test]
    fn vault_path_respects_custom_file() {
        let s = Settings {
            vault_file: "personal.db".to_string(),
            ..Settings::default()
        };
        let dir = Path::new("/home/user/AccountManager");
        assert_eq!(
            s.vault_path(dir),
            PathBuf::from("/home/user/AccountManager/personal.db")
        );
    }
}
