//! `acctvault delete` — remove an account from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_session, prompt_error, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: i64, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete account {id}?"))
            .default(false)
            .interact()
            .map_err(prompt_error)?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (session, _settings) = open_session(cli)?;
    let removed = session.store().delete(id)?;
    session.close()?;

    if !removed {
        return Err(VaultError::RecordNotFound(id));
    }

    output::success(&format!("Deleted account {id}"));
    Ok(())
}
