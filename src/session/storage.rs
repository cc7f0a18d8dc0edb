//! Client-side session storage

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::state::PersistedSession;
use crate::error::{Error, Result};

/// Durable storage for the persisted session shape
pub trait SessionStorage: Send + Sync {
    /// Read the stored shape; `Ok(None)` when nothing was ever stored
    fn load(&self) -> Result<Option<PersistedSession>>;

    fn save(&self, session: &PersistedSession) -> Result<()>;

    /// Remove any stored copy
    fn clear(&self) -> Result<()>;
}

fn decode(raw: &str) -> Result<PersistedSession> {
    serde_json::from_str(raw).map_err(|e| Error::CorruptSession(e.to_string()))
}

/// Serialized session held in memory. Clones share the same slot, so a test can
/// drop a store and restore a new one from the same storage to simulate a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw serialized contents
    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Overwrite the raw contents, e.g. with something unreadable
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.lock() = Some(raw.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedSession>> {
        self.lock().as_deref().map(decode).transpose()
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        *self.lock() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock() = None;
        Ok(())
    }
}

/// Session kept in a JSON file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<PersistedSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        decode(&raw).map(Some)
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        tracing::debug!("Session written to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!("Session file {} removed", self.path.display());
        }
        Ok(())
    }
}
