//! Signed-in user session, persisted between runs.
//!
//! The session survives restarts under one named key until explicit logout.
//! It has an explicit lifecycle (load at startup, save at login, clear at
//! logout) and is passed to the pieces that need it rather than living in
//! a hidden global. The HTTP client only ever reads the token.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nadzor_core::UserId;

/// The signed-in user as returned by `POST /api/auth/signin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub token: String,
}

/// Session persistence failure.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Stores the signed-in user as one JSON document on disk.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// The single key the session lives under.
    pub const FILE_NAME: &'static str = "user.json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, if any.
    pub fn load(&self) -> Result<Option<AuthUser>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let user: AuthUser = serde_json::from_str(&content)?;
        Ok(Some(user))
    }

    /// Persist the signed-in user (login).
    pub fn save(&self, user: &AuthUser) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Remove the persisted session (logout). A missing file is fine.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
