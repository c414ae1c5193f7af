//! Persistent auth session
//!
//! The backend token and user profile survive between runs in a JSON file
//! under the platform data directory. The session has an explicit lifecycle:
//! `load` on startup, `save` after login/register, `clear` on logout. No
//! ambient global state; callers pass the loaded session where it is needed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::User;

/// An authenticated session: backend token plus the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default location: `<data dir>/moneta/session.json`
    pub fn open_default() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| Error::Config("No platform data directory".to_string()))?;
        Ok(Self::at(dir.join("moneta").join("session.json")))
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session; `None` when signed out
    pub fn load(&self) -> Result<Option<AuthSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let session: AuthSession = serde_json::from_str(&raw)?;
        debug!(username = %session.user.username, "Loaded session");
        Ok(Some(session))
    }

    /// Persist a session, replacing any previous one
    pub fn save(&self, session: &AuthSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    /// Remove the persisted session (logout)
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AuthSession {
        AuthSession {
            token: "abc123".to_string(),
            user: User {
                id: 1,
                username: "demo".to_string(),
                email: Some("demo@example.com".to_string()),
            },
        }
    }

    #[test]
    fn save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().unwrap(), None);

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        // Clearing an already-clear store is fine
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_session_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(store.load().is_err());
    }
}
