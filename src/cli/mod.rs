//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::{paths, Settings};
use crate::errors::{Result, VaultError};
use crate::vault::VaultSession;

/// Environment variable checked for the master password before prompting.
pub const PASSWORD_ENV: &str = "ACCTVAULT_PASSWORD";

/// AcctVault CLI: encrypted account and password vault.
#[derive(Parser)]
#[command(
    name = "acctvault",
    about = "Encrypted account and password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: ~/AccountManager)
    #[arg(long, env = "ACCTVAULT_DIR", global = true)]
    pub vault_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a new account
    Add {
        /// Site or service name (e.g. github.com)
        #[arg(short, long)]
        site: String,
        /// Username or account name
        #[arg(short, long)]
        username: String,
        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Password (omit for interactive prompt or piped stdin)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List all accounts
    List {
        /// Show passwords in plaintext
        #[arg(short, long)]
        reveal: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search accounts by site name or username
    Search {
        /// Case-insensitive substring to look for
        keyword: String,
        /// Show passwords in plaintext
        #[arg(short, long)]
        reveal: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one account
    Show {
        /// Account id
        id: i64,
        /// Show the password in plaintext
        #[arg(short, long)]
        reveal: bool,
    },

    /// Update fields of an account (omitted fields are kept)
    Update {
        /// Account id
        id: i64,
        /// New site or service name
        #[arg(short, long)]
        site: Option<String>,
        /// New username
        #[arg(short, long)]
        username: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Prompt for a new password (or read it from piped stdin)
        #[arg(short, long)]
        password: bool,
    },

    /// Delete an account
    Delete {
        /// Account id
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Copy a vault file from an older install into the vault directory
    Migrate {
        /// Vault file to copy (default: ./accounts.db)
        source: Option<PathBuf>,
        /// Do not back up an existing vault file first
        #[arg(long)]
        no_backup: bool,
    },

    /// Interactive menu
    Menu,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault directory from `--vault-dir` / `ACCTVAULT_DIR`,
/// falling back to `~/AccountManager`.
pub fn vault_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.vault_dir {
        Some(dir) => Ok(dir.clone()),
        None => paths::default_app_dir(),
    }
}

/// Load settings and build the full path to the vault file.
pub fn resolve_vault(cli: &Cli) -> Result<(PathBuf, Settings)> {
    let dir = vault_dir(cli)?;
    let settings = Settings::load(&dir)?;
    let path = settings.vault_path(&dir);
    Ok((path, settings))
}

/// Prompt for the master password and open the vault.
///
/// The session releases its connection when dropped, so commands only
/// need to call `close` on the success path.
pub fn open_session(cli: &Cli) -> Result<(VaultSession, Settings)> {
    let (path, settings) = resolve_vault(cli)?;
    let password = prompt_password(!path.exists())?;
    let session = VaultSession::open_at(&path, &password)?;
    Ok((session, settings))
}

/// Get the master password, trying in order:
/// 1. `ACCTVAULT_PASSWORD` env var (scripting)
/// 2. Interactive prompt (with confirmation when the vault is new)
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(new_vault: bool) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let mut prompt = dialoguer::Password::new().with_prompt("Enter master password");
    if new_vault {
        prompt = prompt
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            );
    }

    let pw = prompt.interact().map_err(prompt_error)?;
    Ok(Zeroizing::new(pw))
}

/// Master password from `ACCTVAULT_PASSWORD`; unset and empty are the same.
fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Read an account password from one of three sources:
/// an inline value, piped stdin, or a hidden prompt.
///
/// Piped stdin is consumed here, so the master password must then come
/// from `ACCTVAULT_PASSWORD`; without it this fails before reading.
pub fn read_secret(prompt: &str, inline: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        output::warning("Password provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        if password_from_env().is_none() {
            return Err(VaultError::CommandFailed(format!(
                "password read from stdin needs {PASSWORD_ENV} set for the master password"
            )));
        }
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(&['\r', '\n'][..]).to_string();
        return Ok(Zeroizing::new(trimmed));
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(prompt_error)?;
    Ok(Zeroizing::new(pw))
}

/// Convert a dialoguer failure into a command error.
pub fn prompt_error(e: dialoguer::Error) -> VaultError {
    VaultError::CommandFailed(format!("prompt: {e}"))
}

/// Reject empty or whitespace-only required input.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VaultError::CommandFailed(format!("{field} cannot be empty")));
    }
    Ok(())
}
