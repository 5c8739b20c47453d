//! `acctvault add` — store a new account.

use crate::cli::output;
use crate::cli::{open_session, read_secret, require_non_empty, Cli};
use crate::errors::Result;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    site: &str,
    username: &str,
    notes: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    require_non_empty("site name", site)?;
    require_non_empty("username", username)?;

    let secret = read_secret(&format!("Password for {username}@{site}"), password)?;

    let (session, _settings) = open_session(cli)?;
    let id = session.store().create(site, username, &secret, notes)?;
    let total = session.store().count()?;
    session.close()?;

    output::success(&format!("Account added with ID {id} ({total} total)"));
    output::tip("Run `acctvault list` to see all accounts.");

    Ok(())
}
