//! Durable storage for the bearer credential
//!
//! The session survives process restarts in a small JSON file under the
//! platform config directory. Nothing about the token is validated locally;
//! whether it is still good is discovered through backend response codes.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "docassist";
const SESSION_FILE: &str = "session.json";

/// The client's evidence of an authenticated identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// The opaque bearer token issued by the token endpoint
    pub access_token: String,
}

impl Session {
    /// Create a session from a bearer token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

/// File-backed store holding at most one session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store at the default platform location
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(SESSION_FILE))
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE));
        Self { path }
    }

    /// Create a store at an explicit location
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the saved session, if any. A missing or unreadable file is
    /// treated as "no session"; startup never fails on a corrupt store.
    pub fn load(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Persist a session, overwriting any previous value
    pub fn save(&self, session: &Session) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Remove the persisted session; removing an absent session is fine
    pub fn clear(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
