//! `acctvault show` — print one account's details.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: i64, reveal: bool) -> Result<()> {
    let (session, settings) = open_session(cli)?;
    let record = session.store().get(id)?;
    session.close()?;

    let record = record.ok_or(VaultError::RecordNotFound(id))?;
    output::print_record_details(&record, reveal || settings.reveal_secrets);

    if let Err(failure) = &record.secret {
        output::warning(&format!("Password could not be decrypted: {failure}"));
    }

    Ok(())
}
