//! `acctvault menu` — interactive terminal menu.
//!
//! Opens the vault once and loops over the main actions until the user
//! picks "Exit".  A failing action is reported and the menu continues.

use dialoguer::{Confirm, Input, Password, Select};

use crate::cli::output;
use crate::cli::{open_session, prompt_error, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::{RecordStore, RecordUpdate};

/// Main menu entries, in display order.
const ITEMS: [&str; 6] = [
    "Add account",
    "View all accounts",
    "Search accounts",
    "Update account",
    "Delete account",
    "Exit",
];

/// Execute the `menu` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (session, settings) = open_session(cli)?;
    let outcome = run(session.store(), settings.reveal_secrets);
    session.close()?;
    outcome
}

fn run(store: &RecordStore, reveal: bool) -> Result<()> {
    loop {
        let choice = Select::new()
            .with_prompt("Main menu")
            .items(&ITEMS)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        let result = match choice {
            0 => add(store),
            1 => view_all(store, reveal),
            2 => search(store, reveal),
            3 => update(store),
            4 => delete(store),
            _ => {
                output::info("Goodbye.");
                return Ok(());
            }
        };

        if let Err(e) = result {
            output::error(&e.to_string());
        }
        println!();
    }
}

fn add(store: &RecordStore) -> Result<()> {
    let site = required_text("Site or service name")?;
    let username = required_text("Username")?;
    let secret = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
        .map_err(prompt_error)?;
    let notes = optional_text("Notes (optional)")?;

    let id = store.create(&site, &username, &secret, notes.as_deref())?;
    output::success(&format!("Account added with ID {id}"));
    Ok(())
}

fn view_all(store: &RecordStore, reveal: bool) -> Result<()> {
    let records = store.list_all()?;
    if records.is_empty() {
        output::info("No accounts in this vault yet.");
    } else {
        output::print_records_table(&records, reveal);
    }
    Ok(())
}

fn search(store: &RecordStore, reveal: bool) -> Result<()> {
    let keyword = optional_text("Keyword")?.unwrap_or_default();
    let records = store.search(&keyword)?;
    if records.is_empty() {
        output::info(&format!("No accounts match '{keyword}'."));
    } else {
        output::info(&format!("Found {} account(s)", records.len()));
        output::print_records_table(&records, reveal);
    }
    Ok(())
}

fn update(store: &RecordStore) -> Result<()> {
    let id = read_id("ID of the account to update")?;
    let current = store.get(id)?.ok_or(VaultError::RecordNotFound(id))?;

    output::print_record_details(&current, false);
    output::tip("Leave a field blank to keep its current value.");

    let mut fields = RecordUpdate::new();
    fields.site_name = optional_text(&format!("Site [{}]", current.site_name))?;
    fields.username = optional_text(&format!("Username [{}]", current.username))?;
    let secret = Password::new()
        .with_prompt("New password")
        .allow_empty_password(true)
        .interact()
        .map_err(prompt_error)?;
    if !secret.is_empty() {
        fields.secret = Some(secret);
    }
    fields.notes = optional_text(&format!(
        "Notes [{}]",
        current.notes.as_deref().unwrap_or("")
    ))?;

    if fields.is_empty() {
        output::info("Nothing changed.");
        return Ok(());
    }

    if !store.update(id, &fields)? {
        return Err(VaultError::RecordNotFound(id));
    }
    output::success(&format!("Account {id} updated"));
    Ok(())
}

fn delete(store: &RecordStore) -> Result<()> {
    let id = read_id("ID of the account to delete")?;

    let confirmed = Confirm::new()
        .with_prompt(format!("Delete account {id}?"))
        .default(false)
        .interact()
        .map_err(prompt_error)?;
    if !confirmed {
        output::info("Cancelled.");
        return Ok(());
    }

    if !store.delete(id)? {
        return Err(VaultError::RecordNotFound(id));
    }
    output::success(&format!("Deleted account {id}"));
    Ok(())
}

// ---------------------------------------------------------------------------
// Prompt helpers
// ---------------------------------------------------------------------------

fn read_id(prompt: &str) -> Result<i64> {
    Input::<i64>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(prompt_error)
}

fn required_text(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
            if input.trim().is_empty() {
                Err("this field is required")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_error)
}

/// Blank input means "not given".
fn optional_text(prompt: &str) -> Result<Option<String>> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    Ok(if value.is_empty() { None } else { Some(value) })
}
