//! `acctvault list` — display all accounts in a table.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, reveal: bool, json: bool) -> Result<()> {
    let (session, settings) = open_session(cli)?;
    let records = session.store().list_all()?;
    session.close()?;

    let reveal = reveal || settings.reveal_secrets;

    if json {
        return output::print_records_json(&records, reveal);
    }

    if records.is_empty() {
        output::info("No accounts in this vault yet.");
        output::tip("Run `acctvault add --site <SITE> --username <USER>` to add one.");
        return Ok(());
    }

    output::info(&format!("{} account(s)", records.len()));
    output::print_records_table(&records, reveal);

    Ok(())
}
