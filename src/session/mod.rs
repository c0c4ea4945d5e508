//! Persistent client-side session storage.
//!
//! A single JSON document under the data directory holds the three storage
//! keys: the bearer token, the cached user profile, and the transient email
//! of a pending password reset. Keeping token and profile in one document
//! means `save` and `clear` touch both in a single atomic rename; there is
//! no observable state with one set and not the other.
//!
//! No network calls and no expiry logic live here. Token validity is decided
//! lazily by the server rejecting it on next use, at which point the caller
//! invokes [`SessionStore::clear`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::api::types::UserProfile;

const STORE_FILE: &str = "session.json";

/// An authenticated session: bearer token plus the cached profile.
///
/// Invariant: both fields exist together or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_info: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    forgot_email: Option<String>,
}

/// File-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    base: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn store_path(&self) -> PathBuf {
        self.base.join(STORE_FILE)
    }

    fn read(&self) -> StoreDocument {
        match fs::read(self.store_path()) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                debug!("unreadable session store, treating as empty: {err}");
                StoreDocument::default()
            }),
            Err(_) => StoreDocument::default(),
        }
    }

    fn write(&self, document: &StoreDocument) -> Result<()> {
        fs::create_dir_all(&self.base)
            .with_context(|| format!("Error creating data directory {}", self.base.display()))?;

        // Temp file plus rename keeps token and profile updates atomic.
        let tmp = self.base.join(format!("{STORE_FILE}.tmp"));
        fs::write(&tmp, serde_json::to_vec_pretty(document)?)
            .with_context(|| format!("Error writing session store {}", tmp.display()))?;
        fs::rename(&tmp, self.store_path())
            .with_context(|| format!("Error replacing session store {}", self.base.display()))?;

        Ok(())
    }

    /// Persists token and profile together. Replaces any previous session.
    /// # Errors
    /// Returns an error if the store document cannot be written.
    pub fn save(&self, token: &str, user: &UserProfile) -> Result<()> {
        let mut document = self.read();
        document.auth_token = Some(token.to_string());
        document.user_info = Some(user.clone());
        self.write(&document)
    }

    /// Returns the current session, or `None` when no complete session is
    /// stored. A missing or unreadable store file reads as empty.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        let document = self.read();
        match (document.auth_token, document.user_info) {
            (Some(token), Some(user)) => Some(Session { token, user }),
            _ => None,
        }
    }

    /// Removes token and profile. A pending password reset is untouched.
    /// # Errors
    /// Returns an error if the store document cannot be written.
    pub fn clear(&self) -> Result<()> {
        let mut document = self.read();
        document.auth_token = None;
        document.user_info = None;
        self.write(&document)
    }

    /// True iff a bearer token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().auth_token.is_some()
    }

    /// Records the email a password reset was requested for. At most one
    /// pending reset exists; a new request replaces the old one.
    /// # Errors
    /// Returns an error if the store document cannot be written.
    pub fn set_pending_reset(&self, email: &str) -> Result<()> {
        let mut document = self.read();
        document.forgot_email = Some(email.to_string());
        self.write(&document)
    }

    /// The email of the pending reset, if any.
    #[must_use]
    pub fn pending_reset(&self) -> Option<String> {
        self.read().forgot_email
    }

    /// Drops the pending reset, on completion or cancellation.
    /// # Errors
    /// Returns an error if the store document cannot be written.
    pub fn clear_pending_reset(&self) -> Result<()> {
        let mut document = self.read();
        document.forgot_email = None;
        self.write(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn profile(email: &str) -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            email: email.to_string(),
            is_active: true,
            created_at: Some("2025-01-01T00:00:00".to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn save_then_load_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path());

        store.save("jwt-123", &profile("user@x.com"))?;

        let session = store.load().context("expected a session")?;
        assert_eq!(session.token, "jwt-123");
        assert_eq!(session.user, profile("user@x.com"));
        assert!(store.is_authenticated());
        Ok(())
    }

    #[test]
    fn clear_empties_the_session() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path());

        store.save("jwt-123", &profile("user@x.com"))?;
        store.clear()?;

        assert_eq!(store.load(), None);
        assert!(!store.is_authenticated());
        Ok(())
    }

    #[test]
    fn new_login_replaces_old_session() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path());

        store.save("jwt-old", &profile("old@x.com"))?;
        store.save("jwt-new", &profile("new@x.com"))?;

        let session = store.load().context("expected a session")?;
        assert_eq!(session.token, "jwt-new");
        assert_eq!(session.user.email, "new@x.com");
        Ok(())
    }

    #[test]
    fn missing_store_reads_as_empty() {
        let store = SessionStore::new("/nonexistent/greenaudit-test");
        assert_eq!(store.load(), None);
        assert!(!store.is_authenticated());
        assert_eq!(store.pending_reset(), None);
    }

    #[test]
    fn corrupt_store_reads_as_empty() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path());

        fs::write(dir.path().join(STORE_FILE), b"{not json")?;

        assert_eq!(store.load(), None);
        assert!(!store.is_authenticated());
        Ok(())
    }

    #[test]
    fn pending_reset_survives_session_clear() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path());

        store.save("jwt-123", &profile("user@x.com"))?;
        store.set_pending_reset("user@x.com")?;
        store.clear()?;

        assert_eq!(store.load(), None);
        assert_eq!(store.pending_reset(), Some("user@x.com".to_string()));

        store.clear_pending_reset()?;
        assert_eq!(store.pending_reset(), None);
        Ok(())
    }

    #[test]
    fn partial_document_is_not_a_session() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path());

        // Hand-written document with a token but no profile.
        fs::create_dir_all(dir.path())?;
        fs::write(
            dir.path().join(STORE_FILE),
            br#"{"auth_token": "jwt-123"}"#,
        )?;

        assert_eq!(store.load(), None);
        Ok(())
    }
}
