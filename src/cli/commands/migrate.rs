//! `acctvault migrate` — copy a vault file from an older install.

use std::path::{Path, PathBuf};

use crate::cli::output;
use crate::cli::{resolve_vault, Cli};
use crate::errors::Result;

/// Default source: `accounts.db` in the current directory.
const DEFAULT_SOURCE: &str = "accounts.db";

/// Files from the old account manager keyed the XOR with a different byte
/// string, so their secrets never decode here.
const OLD_FORMAT_NOTICE: &str = "Passwords saved by the old account manager use an incompatible \
     encoding and will show as <decryption failed> or garbled text; \
     site names, usernames and notes are intact.";

/// Execute the `migrate` command.
pub fn execute(cli: &Cli, source: Option<&Path>, no_backup: bool) -> Result<()> {
    let source = match source {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?.join(DEFAULT_SOURCE),
    };
    let (dest, settings) = resolve_vault(cli)?;

    if same_file(&source, &dest) {
        output::info("Source and destination are the same file — nothing to do.");
        return Ok(());
    }

    output::info(&format!(
        "Copying {} to {}",
        source.display(),
        dest.display()
    ));

    let backup = settings.backup_on_migrate && !no_backup;
    let report = crate::migrate::migrate(&source, &dest, backup)?;

    if let Some(path) = &report.backup {
        output::info(&format!("Previous vault backed up to {}", path.display()));
    }
    output::success(&format!("Migrated {} account record(s)", report.rows));
    if report.rows > 0 {
        output::warning(OLD_FORMAT_NOTICE);
        output::tip("Check with `acctvault list`, then run `acctvault update <ID> --password` for each affected account.");
    }

    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    let canon = |p: &Path| -> Option<PathBuf> { p.canonicalize().ok() };
    matches!((canon(a), canon(b)), (Some(x), Some(y)) if x == y)
}
