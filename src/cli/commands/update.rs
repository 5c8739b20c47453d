//! `acctvault update` — change some fields of an account.

use crate::cli::output;
use crate::cli::{open_session, read_secret, require_non_empty, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::RecordUpdate;

/// Execute the `update` command.
pub fn execute(
    cli: &Cli,
    id: i64,
    site: Option<&str>,
    username: Option<&str>,
    notes: Option<&str>,
    new_password: bool,
) -> Result<()> {
    if let Some(site) = site {
        require_non_empty("site name", site)?;
    }
    if let Some(username) = username {
        require_non_empty("username", username)?;
    }

    let mut fields = RecordUpdate::new();
    fields.site_name = site.map(str::to_string);
    fields.username = username.map(str::to_string);
    fields.notes = notes.map(str::to_string);
    if new_password {
        let secret = read_secret("New password", None)?;
        fields.secret = Some(secret.as_str().to_owned());
    }

    if fields.is_empty() {
        return Err(VaultError::CommandFailed(
            "nothing to update — pass --site, --username, --notes or --password".into(),
        ));
    }

    let (session, _settings) = open_session(cli)?;
    let updated = session.store().update(id, &fields)?;
    session.close()?;

    if !updated {
        return Err(VaultError::RecordNotFound(id));
    }

    output::success(&format!("Account {id} updated"));
    Ok(())
}
