//! SQLite schema for the `accounts` table.
//!
//! ```text
//! id          INTEGER PRIMARY KEY AUTOINCREMENT
//! site_name   TEXT NOT NULL
//! username    TEXT NOT NULL
//! password    TEXT NOT NULL            -- base64(prefix | xor body)
//! notes       TEXT
//! created_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP
//! ```
//!
//! `AUTOINCREMENT` keeps SQLite from handing out the id of a deleted
//! row again.  Files copied in from older installs carry a plain
//! `INTEGER PRIMARY KEY`; [`upgrade_legacy_ids`] rebuilds those once.
//!
//! `created_at` may be NULL or unparseable in such files, so it is read
//! leniently with [`read_timestamp`].

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::Connection;

/// Name of the record table.
pub const TABLE: &str = "accounts";

/// Column definitions shared by the normal and the rebuild DDL.
const TABLE_BODY: &str = "(
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    site_name   TEXT NOT NULL,
    username    TEXT NOT NULL,
    password    TEXT NOT NULL,
    notes       TEXT,
    created_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Columns every query selects, in this order.
pub const COLUMNS: &str = "id, site_name, username, password, notes, created_at";

const COLUMN_COUNT: i64 = 6;

/// Format SQLite uses for `CURRENT_TIMESTAMP`.
const SQLITE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Create the table if it doesn't exist.  Safe to run repeatedly.
pub fn apply(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(&format!("CREATE TABLE IF NOT EXISTS {TABLE} {TABLE_BODY};"))
}

/// Check that the table has every column the store reads.
///
/// Preparing the statement is enough: SQLite resolves column names at
/// prepare time.
pub fn validate(conn: &Connection) -> rusqlite::Result<()> {
    conn.prepare(&format!("SELECT {COLUMNS} FROM {TABLE} LIMIT 0"))?;
    Ok(())
}

/// Rebuild a table declared without `AUTOINCREMENT`, keeping every row
/// and its id.  Returns `true` if a rebuild happened.
///
/// Runs in one transaction; on failure the old table is left untouched.
/// Tables with columns beyond [`COLUMNS`] are left alone so nothing is
/// dropped.
pub fn upgrade_legacy_ids(conn: &Connection) -> rusqlite::Result<bool> {
    let ddl: String = conn.query_row(
        "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [TABLE],
        |row| row.get(0),
    )?;
    if ddl.to_ascii_uppercase().contains("AUTOINCREMENT") {
        return Ok(false);
    }

    let columns: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1)",
        [TABLE],
        |row| row.get(0),
    )?;
    if columns != COLUMN_COUNT {
        return Ok(false);
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(&format!(
        "CREATE TABLE accounts_rebuild {TABLE_BODY};
         INSERT INTO accounts_rebuild ({COLUMNS}) SELECT {COLUMNS} FROM {TABLE};
         DROP TABLE {TABLE};
         ALTER TABLE accounts_rebuild RENAME TO {TABLE};"
    ))?;
    tx.commit()?;
    Ok(true)
}

/// Read a stored `created_at` value.
///
/// Text is parsed as SQLite's `CURRENT_TIMESTAMP` format (always UTC) or
/// RFC 3339; integers are Unix seconds.  Anything else is `None`.
pub fn read_timestamp(value: ValueRef<'_>) -> Option<DateTime<Utc>> {
    match value {
        ValueRef::Text(raw) => std::str::from_utf8(raw).ok().and_then(parse_timestamp),
        ValueRef::Integer(secs) => DateTime::from_timestamp(secs, 0),
        _ => None,
    }
}

/// Parse timestamp text; see [`read_timestamp`].
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, SQLITE_TIMESTAMP) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();
        apply(&conn).unwrap();
        validate(&conn).unwrap();
    }

    #[test]
    fn validate_rejects_missing_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE accounts (id INTEGER PRIMARY KEY, site_name TEXT);")
            .unwrap();
        // The existing table wins over CREATE TABLE IF NOT EXISTS.
        apply(&conn).unwrap();
        assert!(validate(&conn).is_err());
    }

    const LEGACY_DDL: &str = "CREATE TABLE accounts (
        id INTEGER PRIMARY KEY,
        site_name TEXT NOT NULL,
        username TEXT NOT NULL,
        password TEXT NOT NULL,
        notes TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );";

    #[test]
    fn validate_accepts_legacy_primary_key() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(LEGACY_DDL).unwrap();
        apply(&conn).unwrap();
        validate(&conn).unwrap();
    }

    #[test]
    fn legacy_table_is_rebuilt_with_rows_and_ids() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(LEGACY_DDL).unwrap();
        conn.execute_batch(
            "INSERT INTO accounts (id, site_name, username, password, notes, created_at)
             VALUES (3, 'a.com', 'u', 'x', NULL, '2023-01-02 03:04:05'),
                    (7, 'b.com', 'v', 'y', 'n', NULL);",
        )
        .unwrap();

        assert!(upgrade_legacy_ids(&conn).unwrap());
        validate(&conn).unwrap();

        let rows: Vec<(i64, String, Option<String>)> = conn
            .prepare("SELECT id, site_name, created_at FROM accounts ORDER BY id")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(
            rows,
            vec![
                (3, "a.com".into(), Some("2023-01-02 03:04:05".into())),
                (7, "b.com".into(), None),
            ]
        );

        // Deleting the highest id must not free it for the next insert.
        conn.execute("DELETE FROM accounts WHERE id = 7", []).unwrap();
        conn.execute(
            "INSERT INTO accounts (site_name, username, password) VALUES ('c', 'w', 'z')",
            [],
        )
        .unwrap();
        assert_eq!(conn.last_insert_rowid(), 8);
    }

    #[test]
    fn upgrade_is_a_no_op_on_current_schema() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();
        assert!(!upgrade_legacy_ids(&conn).unwrap());
    }

    #[test]
    fn upgrade_leaves_tables_with_extra_columns_alone() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE accounts (
                id INTEGER PRIMARY KEY, site_name TEXT NOT NULL, username TEXT NOT NULL,
                password TEXT NOT NULL, notes TEXT, created_at TIMESTAMP, tag TEXT
            );",
        )
        .unwrap();
        assert!(!upgrade_legacy_ids(&conn).unwrap());
        validate(&conn).unwrap();
    }

    #[test]
    fn parse_sqlite_timestamp() {
        let ts = parse_timestamp("2024-03-01 12:34:56").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T12:34:56+00:00");
    }

    #[test]
    fn parse_rfc3339_timestamp() {
        let ts = parse_timestamp("2024-03-01T14:34:56+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T12:34:56+00:00");
    }

    #[test]
    fn garbage_timestamp_is_none() {
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn read_timestamp_handles_null_and_integers() {
        assert!(read_timestamp(ValueRef::Null).is_none());
        let ts = read_timestamp(ValueRef::Integer(0)).unwrap();
        assert_eq!(ts.to_rfc3339(), "1970-01-01T00:00:00+00:00");
        assert!(read_timestamp(ValueRef::Text(&b"2024-03-01 12:34:56"[..])).is_some());
    }
}
