//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::{DateTime, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;
use serde::Serialize;

use crate::errors::{Result, VaultError};
use crate::vault::Record;

/// Shown in place of a secret that could not be decoded.
pub const DECRYPTION_FAILED: &str = "<decryption failed>";

/// Shown in place of a secret when `--reveal` is off.
const MASK: &str = "********";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Text for the password column.
pub fn secret_cell(record: &Record, reveal: bool) -> String {
    match &record.secret {
        Err(_) => DECRYPTION_FAILED.to_string(),
        Ok(_) if !reveal => MASK.to_string(),
        Ok(secret) => secret.clone(),
    }
}

/// Print a table of records (Id, Site, Username, Password, Notes, Created).
pub fn print_records_table(records: &[Record], reveal: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Site", "Username", "Password", "Notes", "Created"]);

    for r in records {
        table.add_row(vec![
            r.id.to_string(),
            r.site_name.clone(),
            r.username.clone(),
            secret_cell(r, reveal),
            r.notes.clone().unwrap_or_default(),
            created_cell(r),
        ]);
    }

    println!("{table}");
}

/// Print every field of one record, one per line.
pub fn print_record_details(record: &Record, reveal: bool) {
    println!("{:<10} {}", style("ID").bold(), record.id);
    println!("{:<10} {}", style("Site").bold(), record.site_name);
    println!("{:<10} {}", style("Username").bold(), record.username);
    println!("{:<10} {}", style("Password").bold(), secret_cell(record, reveal));
    println!(
        "{:<10} {}",
        style("Notes").bold(),
        record.notes.as_deref().unwrap_or("")
    );
    println!("{:<10} {}", style("Created").bold(), created_cell(record));
}

/// Text for the creation time; blank when the vault never recorded one.
fn created_cell(record: &Record) -> String {
    record
        .created_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// JSON shape of a record for `--json` output.
#[derive(Debug, Serialize)]
pub struct RecordJson<'a> {
    pub id: i64,
    pub site_name: &'a str,
    pub username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decryption_error: Option<String>,
    pub notes: Option<&'a str>,
    pub created_at: Option<DateTime<Utc>>,
}

impl<'a> RecordJson<'a> {
    pub fn new(record: &'a Record, reveal: bool) -> Self {
        let (password, decryption_error) = match &record.secret {
            Ok(secret) if reveal => (Some(secret.as_str()), None),
            Ok(_) => (None, None),
            Err(failure) => (None, Some(failure.to_string())),
        };

        Self {
            id: record.id,
            site_name: &record.site_name,
            username: &record.username,
            password,
            decryption_error,
            notes: record.notes.as_deref(),
            created_at: record.created_at,
        }
    }
}

/// Print records as a pretty JSON array on stdout.
pub fn print_records_json(records: &[Record], reveal: bool) -> Result<()> {
    let view: Vec<RecordJson<'_>> = records.iter().map(|r| RecordJson::new(r, reveal)).collect();
    let json = serde_json::to_string_pretty(&view)
        .map_err(|e| VaultError::SerializationError(format!("records: {e}")))?;
    println!("{json}");
    Ok(())
}
