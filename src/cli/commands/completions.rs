//! `acctvault completions` — print a shell completion script.
//!
//!   acctvault completions bash > ~/.local/share/bash-completion/completions/acctvault
//!   acctvault completions zsh > "${fpath[1]}/_acctvault"
//!
//! The shell name is validated by clap (`Shell` is a value enum).

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

const BIN_NAME: &str = "acctvault";

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(&script(shell))?;
    stdout.flush()?;
    Ok(())
}

/// Completion script for `shell`, covering every subcommand and the
/// global `--vault-dir` flag.
pub fn script(shell: Shell) -> Vec<u8> {
    let mut buf = Vec::new();
    generate(shell, &mut Cli::command(), BIN_NAME, &mut buf);
    buf
}
