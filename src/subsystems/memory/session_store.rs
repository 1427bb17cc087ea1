//! Session transcript store.
//!
//! The outer `Mutex<HashMap>` only maps a session id to its own transcript
//! slot and is released before any file I/O; each slot has its own lock, so
//! disk access for one session never blocks another. With a `session_dir`
//! every append is written to `{dir}/{id}.json` *before* the in-memory copy
//! is updated, so a failed write leaves both views unchanged. Sessions not
//! yet in memory are read back from disk on first access. All methods block;
//! async callers go through `spawn_blocking`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::MemoryConfig;
use crate::error::AppError;

use super::TranscriptEntry;

/// `None` until the session has been read back from disk.
type Slot = Arc<Mutex<Option<Vec<TranscriptEntry>>>>;

pub struct SessionStore {
    sessions: Mutex<HashMap<String, Slot>>,
    session_dir: Option<PathBuf>,
    transcript_cap: Option<usize>,
}

impl SessionStore {
    /// Build from config, creating `session_dir` if one is configured.
    pub fn new(config: &MemoryConfig) -> Result<Self, AppError> {
        if let Some(dir) = &config.session_dir {
            fs::create_dir_all(dir).map_err(|e| {
                AppError::Memory(format!("cannot create session dir {}: {e}", dir.display()))
            })?;
            info!(session_dir = %dir.display(), "session transcripts persisted to disk");
        }
        Ok(Self {
            sessions: Mutex::new(HashMap::new()),
            session_dir: config.session_dir.clone(),
            transcript_cap: config.transcript_cap,
        })
    }

    /// Purely in-memory, unbounded.
    pub fn in_memory() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            session_dir: None,
            transcript_cap: None,
        }
    }

    /// Append one exchange to `session_id`'s transcript.
    pub fn append(&self, session_id: &str, entry: TranscriptEntry) -> Result<(), AppError> {
        validate_id(session_id)?;
        let slot = self.slot(session_id)?;
        let mut transcript = lock_slot(&slot)?;

        let mut entries = match transcript.as_ref() {
            Some(existing) => existing.clone(),
            None => self.read_from_disk(session_id)?,
        };
        entries.push(entry);
        if let Some(cap) = self.transcript_cap {
            let excess = entries.len().saturating_sub(cap);
            entries.drain(..excess);
        }

        if let Some(dir) = &self.session_dir {
            write_transcript(&transcript_path(dir, session_id), &entries)?;
        }
        debug!(session_id, entries = entries.len(), "transcript appended");
        *transcript = Some(entries);
        Ok(())
    }

    /// Entries for `session_id` in append order; empty for an unknown session.
    pub fn history(&self, session_id: &str) -> Result<Vec<TranscriptEntry>, AppError> {
        validate_id(session_id)?;
        let known = self.lock()?.get(session_id).cloned();
        let slot = match known {
            Some(slot) => slot,
            None if self.session_dir.is_none() => return Ok(Vec::new()),
            None => self.slot(session_id)?,
        };

        let mut transcript = lock_slot(&slot)?;
        if let Some(entries) = transcript.as_ref() {
            return Ok(entries.clone());
        }
        let entries = self.read_from_disk(session_id)?;
        *transcript = Some(entries.clone());
        Ok(entries)
    }

    /// Number of sessions currently held in memory.
    #[cfg(test)]
    fn session_count(&self) -> usize {
        self.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// The slot for `session_id`, created empty and unloaded if absent.
    fn slot(&self, session_id: &str) -> Result<Slot, AppError> {
        Ok(self.lock()?.entry(session_id.to_string()).or_default().clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Slot>>, AppError> {
        self.sessions
            .lock()
            .map_err(|_| AppError::Memory("session map lock poisoned".into()))
    }

    fn read_from_disk(&self, session_id: &str) -> Result<Vec<TranscriptEntry>, AppError> {
        match &self.session_dir {
            Some(dir) => read_transcript(&transcript_path(dir, session_id)),
            None => Ok(Vec::new()),
        }
    }
}

fn lock_slot(slot: &Slot) -> Result<MutexGuard<'_, Option<Vec<TranscriptEntry>>>, AppError> {
    slot.lock()
        .map_err(|_| AppError::Memory("session transcript lock poisoned".into()))
}

/// Session ids double as file names, so only canonical UUIDs are accepted.
fn validate_id(session_id: &str) -> Result<(), AppError> {
    Uuid::parse_str(session_id)
        .map(|_| ())
        .map_err(|e| AppError::Memory(format!("invalid session id '{session_id}': {e}")))
}

fn transcript_path(dir: &Path, session_id: &str) -> PathBuf {
    dir.join(format!("{session_id}.json"))
}

fn read_transcript(path: &Path) -> Result<Vec<TranscriptEntry>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)
        .map_err(|e| AppError::Memory(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&data)
        .map_err(|e| AppError::Memory(format!("malformed {}: {e}", path.display())))
}

fn write_transcript(path: &Path, entries: &[TranscriptEntry]) -> Result<(), AppError> {
    let data = serde_json::to_string_pretty(entries)
        .map_err(|e| AppError::Memory(format!("serialise transcript: {e}")))?;
    fs::write(path, data)
        .map_err(|e| AppError::Memory(format!("cannot write {}: {e}", path.display())))
}
