//! `acctvault search` — find accounts by site name or username.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `search` command.
pub fn execute(cli: &Cli, keyword: &str, reveal: bool, json: bool) -> Result<()> {
    let (session, settings) = open_session(cli)?;
    let records = session.store().search(keyword)?;
    session.close()?;

    let reveal = reveal || settings.reveal_secrets;

    if json {
        return output::print_records_json(&records, reveal);
    }

    if records.is_empty() {
        output::info(&format!("No accounts match '{keyword}'."));
        return Ok(());
    }

    output::info(&format!("Found {} account(s) matching '{keyword}'", records.len()));
    output::print_records_table(&records, reveal);

    Ok(())
}
