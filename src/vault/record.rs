//! Record and RecordUpdate types.

use chrono::{DateTime, Utc};

use crate::crypto::DecryptionFailure;

/// A single credential entry, with its secret already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Store-assigned id, never reused.
    pub id: i64,

    /// Site or service label (e.g. "github.com").
    pub site_name: String,

    pub username: String,

    /// The decoded secret, or why it could not be decoded.
    pub secret: Result<String, DecryptionFailure>,

    pub notes: Option<String>,

    /// Set by the storage engine at insert time.  `None` when the stored
    /// value is missing or unreadable, as in some older vault files.
    pub created_at: Option<DateTime<Utc>>,
}

impl Record {
    /// The plaintext secret, if it decoded.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref().ok()
    }

    /// Returns `true` if `keyword` occurs in the site name or username,
    /// ignoring case.  Notes and the secret are never searched.
    pub fn matches(&self, keyword: &str) -> bool {
        matches_keyword(&self.site_name, &self.username, keyword)
    }
}

pub(crate) fn matches_keyword(site_name: &str, username: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    let needle = keyword.to_lowercase();
    site_name.to_lowercase().contains(&needle) || username.to_lowercase().contains(&needle)
}

/// A partial update: `None` keeps the stored value, `Some` replaces it.
///
/// `Some(String::new())` sets a field to the empty string, which is
/// different from leaving it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub site_name: Option<String>,
    pub username: Option<String>,
    /// New plaintext secret; re-encrypted before storage.
    pub secret: Option<String>,
    pub notes: Option<String>,
}

impl RecordUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn site_name(mut self, value: impl Into<String>) -> Self {
        self.site_name = Some(value.into());
        self
    }

    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.username = Some(value.into());
        self
    }

    pub fn secret(mut self, value: impl Into<String>) -> Self {
        self.secret = Some(value.into());
        self
    }

    pub fn notes(mut self, value: impl Into<String>) -> Self {
        self.notes = Some(value.into());
        self
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.site_name.is_none()
            && self.username.is_none()
            && self.secret.is_none()
            && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, user: &str) -> Record {
        Record {
            id: 1,
            site_name: site.to_string(),
            username: user.to_string(),
            secret: Ok("pw".to_string()),
            notes: Some("git hosting".to_string()),
            created_at: Some(Utc::now()),
        }
    }

    #[test]
    fn matches_site_or_username_case_insensitively() {
        let r = record("GitHub.com", "Alice");
        assert!(r.matches("git"));
        assert!(r.matches("HUB"));
        assert!(r.matches("alice"));
        assert!(!r.matches("bob"));
    }

    #[test]
    fn matches_ignores_notes() {
        let r = record("example.com", "carol");
        assert!(!r.matches("hosting"));
    }

    #[test]
    fn empty_keyword_matches_everything() {
        assert!(record("a", "b").matches(""));
    }

    #[test]
    fn secret_accessor_hides_failures() {
        let mut r = record("a", "b");
        assert_eq!(r.secret(), Some("pw"));
        r.secret = Err(DecryptionFailure::NotText);
        assert_eq!(r.secret(), None);
    }

    #[test]
    fn update_builder_sets_only_named_fields() {
        let update = RecordUpdate::new().secret("new").notes("");
        assert_eq!(update.secret.as_deref(), Some("new"));
        assert_eq!(update.notes.as_deref(), Some(""));
        assert!(update.site_name.is_none());
        assert!(update.username.is_none());
        assert!(!update.is_empty());
        assert!(RecordUpdate::new().is_empty());
    }
}
