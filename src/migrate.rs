//! Copy a vault file from an older install into the vault location.
//!
//! The file is copied byte-for-byte (schema included) and then verified
//! by counting rows in the `accounts` table.  Nothing is decrypted, so no
//! passphrase is needed.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::errors::{Result, VaultError};

/// Outcome of a successful migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Rows found in the migrated file.
    pub rows: usize,
    /// Where the previous destination file was copied, if it existed.
    pub backup: Option<PathBuf>,
}

/// Path used for the backup of an existing destination file.
///
/// Example: `accounts.db` -> `accounts.db.backup`
pub fn backup_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".backup");
    PathBuf::from(name)
}

/// Copy `source` over `dest`, optionally backing up `dest` first.
pub fn migrate(source: &Path, dest: &Path, backup: bool) -> Result<MigrationReport> {
    if !source.is_file() {
        return Err(VaultError::MigrationFailed(format!(
            "source vault not found at {}",
            source.display()
        )));
    }

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let backup = if backup && dest.exists() {
        let path = backup_path(dest);
        fs::copy(dest, &path)?;
        debug!(backup = %path.display(), "existing vault backed up");
        Some(path)
    } else {
        None
    };

    fs::copy(source, dest)?;
    debug!(from = %source.display(), to = %dest.display(), "vault file copied");

    let rows = count_rows(dest)?;
    Ok(MigrationReport { rows, backup })
}

/// Count rows in `accounts` without modifying the file.
pub fn count_rows(path: &Path) -> Result<usize> {
    let verify = |e: rusqlite::Error| {
        VaultError::MigrationFailed(format!("cannot verify {}: {e}", path.display()))
    };

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(verify)?;
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
        .map_err(verify)?;

    usize::try_from(n).map_err(|_| VaultError::MigrationFailed(format!("bad row count {n}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(path: &Path, rows: usize) {
        let conn = Connection::open(path).unwrap();
        crate::vault::schema::apply(&conn).unwrap();
        for i in 0..rows {
            conn.execute(
                "INSERT INTO accounts (site_name, username, password) VALUES (?1, 'u', 'cA==')",
                [format!("site{i}")],
            )
            .unwrap();
        }
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/a/accounts.db")),
            PathBuf::from("/a/accounts.db.backup")
        );
    }

    #[test]
    fn migrate_copies_bytes_and_counts_rows() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old.db");
        let dest = dir.path().join("new").join("accounts.db");
        seed(&source, 3);

        let report = migrate(&source, &dest, true).unwrap();
        assert_eq!(report.rows, 3);
        assert_eq!(report.backup, None);
        assert_eq!(fs::read(&source).unwrap(), fs::read(&dest).unwrap());
    }

    #[test]
    fn migrate_backs_up_existing_destination() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old.db");
        let dest = dir.path().join("accounts.db");
        seed(&source, 2);
        seed(&dest, 5);
        let original_dest = fs::read(&dest).unwrap();

        let report = migrate(&source, &dest, true).unwrap();
        assert_eq!(report.rows, 2);

        let backup = report.backup.unwrap();
        assert_eq!(fs::read(&backup).unwrap(), original_dest);
        assert_eq!(count_rows(&backup).unwrap(), 5);
    }

    #[test]
    fn migrate_without_backup_overwrites() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old.db");
        let dest = dir.path().join("accounts.db");
        seed(&source, 1);
        seed(&dest, 4);

        let report = migrate(&source, &dest, false).unwrap();
        assert_eq!(report.rows, 1);
        assert!(report.backup.is_none());
        assert!(!backup_path(&dest).exists());
    }

    #[test]
    fn migrate_fails_when_source_missing() {
        let dir = TempDir::new().unwrap();
        let result = migrate(
            &dir.path().join("missing.db"),
            &dir.path().join("accounts.db"),
            true,
        );
        assert!(matches!(result, Err(VaultError::MigrationFailed(_))));
    }

    #[test]
    fn migrate_fails_verification_for_non_vault_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("notes.txt");
        fs::write(&source, "just some text").unwrap();

        let result = migrate(&source, &dir.path().join("accounts.db"), false);
        assert!(matches!(result, Err(VaultError::MigrationFailed(_))));
    }
}
