//! Record CRUD over the SQLite `accounts` table.
//!
//! `RecordStore` owns the connection and the derived key.  Secrets are
//! encoded on every write and decoded on every read; a secret that fails
//! to decode is reported in its record instead of failing the query.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

use crate::crypto::{cipher, DerivedKey};
use crate::errors::{Result, VaultError};

use super::record::{matches_keyword, Record, RecordUpdate};
use super::schema::{self, COLUMNS};

/// A row as stored on disk, secret still encoded.
struct StoredRow {
    id: i64,
    site_name: String,
    username: String,
    password: String,
    notes: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            site_name: row.get(1)?,
            username: row.get(2)?,
            password: row.get(3)?,
            notes: row.get(4)?,
            created_at: schema::read_timestamp(row.get_ref(5)?),
        })
    }
}

/// Encrypted record storage bound to one key and one connection.
pub struct RecordStore {
    conn: Connection,
    key: DerivedKey,
}

impl RecordStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Bind `key` to an open connection, creating the table if needed.
    ///
    /// Fails if the file is not a database or the existing table lacks
    /// a column the store reads.  A table from an older install is
    /// rebuilt so ids stop being reused.
    pub fn new(conn: Connection, key: DerivedKey) -> rusqlite::Result<Self> {
        schema::apply(&conn)?;
        schema::validate(&conn)?;
        if schema::upgrade_legacy_ids(&conn)? {
            info!("accounts table rebuilt with AUTOINCREMENT ids");
        }
        Ok(Self { conn, key })
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Encrypt the secret, insert a new record and return its id.
    pub fn create(
        &self,
        site_name: &str,
        username: &str,
        secret: &str,
        notes: Option<&str>,
    ) -> Result<i64> {
        let encoded = cipher::encode(secret.as_bytes(), &self.key);

        self.conn.execute(
            "INSERT INTO accounts (site_name, username, password, notes)
             VALUES (?1, ?2, ?3, ?4)",
            params![site_name, username, encoded, notes],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(id, "record created");
        Ok(id)
    }

    /// Every record, ordered by site name (ties by id).
    pub fn list_all(&self) -> Result<Vec<Record>> {
        let rows = self.fetch_all()?;
        Ok(rows.into_iter().map(|row| self.decode_row(row)).collect())
    }

    /// Records whose site name or username contains `keyword`, ignoring
    /// case.  Same order as [`RecordStore::list_all`]; an empty keyword
    /// returns everything.
    pub fn search(&self, keyword: &str) -> Result<Vec<Record>> {
        let rows = self.fetch_all()?;
        Ok(rows
            .into_iter()
            .filter(|row| matches_keyword(&row.site_name, &row.username, keyword))
            .map(|row| self.decode_row(row))
            .collect())
    }

    /// Look up a single record by id.
    pub fn get(&self, id: i64) -> Result<Option<Record>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM accounts WHERE id = ?1"),
                params![id],
                StoredRow::from_row,
            )
            .optional()?;

        Ok(row.map(|row| self.decode_row(row)))
    }

    /// Apply a partial update in one statement.
    ///
    /// Returns `false` if no record has this id.
    pub fn update(&self, id: i64, fields: &RecordUpdate) -> Result<bool> {
        let encoded = fields
            .secret
            .as_deref()
            .map(|secret| cipher::encode(secret.as_bytes(), &self.key));

        let changed = self.conn.execute(
            "UPDATE accounts SET
                 site_name = COALESCE(?1, site_name),
                 username  = COALESCE(?2, username),
                 password  = COALESCE(?3, password),
                 notes     = COALESCE(?4, notes)
             WHERE id = ?5",
            params![fields.site_name, fields.username, encoded, fields.notes, id],
        )?;

        debug!(id, found = changed > 0, "record update");
        Ok(changed > 0)
    }

    /// Remove a record.  Returns whether a row was actually deleted.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM accounts WHERE id = ?1", params![id])?;

        debug!(id, found = removed > 0, "record delete");
        Ok(removed > 0)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
        usize::try_from(n).map_err(|_| VaultError::SerializationError(format!("bad count {n}")))
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Close the connection, surfacing any error SQLite reports.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| VaultError::Storage(e))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn fetch_all(&self) -> Result<Vec<StoredRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM accounts ORDER BY site_name, id"
        ))?;

        let rows = stmt.query_map([], StoredRow::from_row)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn decode_row(&self, row: StoredRow) -> Record {
        let secret = cipher::decode(&row.password, &self.key);
        if let Err(failure) = &secret {
            warn!(id = row.id, error = %failure, "stored secret could not be decoded");
        }

        Record {
            id: row.id,
            site_name: row.site_name,
            username: row.username,
            secret,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}
