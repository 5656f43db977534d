//! Persistence of the signed-in user's identifier.
//!
//! # Design
//! The store is a tiny key-value file with a single meaningful key,
//! `userId`. An identifier stays valid until it is overwritten; there is no
//! expiry and no server-side check.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SessionError;
use crate::types::SessionId;

/// Key under which the identifier is stored.
pub const SESSION_KEY: &str = "userId";

pub trait SessionStore {
    fn get(&self) -> Result<Option<SessionId>, SessionError>;
    fn set(&mut self, id: SessionId) -> Result<(), SessionError>;
}

/// Session kept in process memory only.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    id: Option<SessionId>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(id: SessionId) -> Self {
        Self { id: Some(id) }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<SessionId>, SessionError> {
        Ok(self.id.clone())
    }

    fn set(&mut self, id: SessionId) -> Result<(), SessionError> {
        self.id = Some(id);
        Ok(())
    }
}

/// Session persisted as a JSON object on disk.
///
/// Keys other than `userId` are preserved on write.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| SessionError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<SessionId>, SessionError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(SESSION_KEY)
            .filter(|id| !id.is_empty())
            .map(SessionId::new))
    }

    fn set(&mut self, id: SessionId) -> Result<(), SessionError> {
        let mut entries = self.read_entries()?;
        entries.insert(SESSION_KEY.to_string(), id.as_str().to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let contents = serde_json::to_string_pretty(&entries).map_err(|source| {
            SessionError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        // Write a sibling file first so a crash never leaves a truncated session.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, contents).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::info!(path = %self.path.display(), "session stored");
        Ok(())
    }
}
