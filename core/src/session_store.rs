//! Local session store.
//!
//! A JSON object of string keys to string values, written by the web login
//! flow. The client only reads `authToken` and `userData`, and only deletes
//! them when `userData` is corrupt.
//!
//! Writes go through a temp file in the same directory followed by a rename,
//! so a crash never leaves a half-written store behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use moodlens_types::{AuthToken, SessionContext, UserProfile};

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_DATA_KEY: &str = "userData";

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("failed to read session store {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write session store {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

type Entries = BTreeMap<String, String>;

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries. A missing file is empty; a file that is not a JSON
    /// object of strings is treated as empty as well.
    fn read_entries(&self) -> Result<Entries, SessionStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(source) => {
                return Err(SessionStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(path = %self.path.display(), "Ignoring unreadable session store: {err}");
                Ok(Entries::new())
            }
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), SessionStoreError> {
        let wrap = |source| SessionStoreError::Write {
            path: self.path.clone(),
            source,
        };
        let bytes = serde_json::to_vec_pretty(entries).map_err(|e| wrap(e.into()))?;
        write_owner_only(&self.path, &bytes).map_err(wrap)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    /// Delete `keys`. The file is left untouched when none of them exist.
    pub fn remove(&self, keys: &[&str]) -> Result<(), SessionStoreError> {
        let mut entries = self.read_entries()?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() == before {
            return Ok(());
        }
        self.write_entries(&entries)
    }

    /// Derive the session context from the stored entries.
    ///
    /// Never fails: IO problems are logged and yield `Anonymous`. A corrupt
    /// `userData` entry clears both session entries.
    pub fn load_session(&self) -> SessionContext {
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err) => {
                warn!("{err}");
                return SessionContext::Anonymous;
            }
        };

        let token = entries
            .get(AUTH_TOKEN_KEY)
            .filter(|value| !value.is_empty());
        let user_data = entries.get(USER_DATA_KEY).filter(|value| !value.is_empty());
        let (Some(token), Some(user_data)) = (token, user_data) else {
            debug!("No stored session");
            return SessionContext::Anonymous;
        };

        match serde_json::from_str::<UserProfile>(user_data) {
            Ok(profile) => {
                debug!(username = %profile.username, "Loaded stored session");
                SessionContext::SignedIn {
                    token: AuthToken::new(token.clone()),
                    profile,
                }
            }
            Err(err) => {
                warn!("Error parsing stored user data, clearing session: {err}");
                if let Err(err) = self.remove(&[AUTH_TOKEN_KEY, USER_DATA_KEY]) {
                    warn!("{err}");
                }
                SessionContext::Anonymous
            }
        }
    }
}

/// Atomically replace `path` with `bytes`, readable only by the owner on Unix.
fn write_owner_only(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))?;
    }
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
