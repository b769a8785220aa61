use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;
use train_core::model::ProgressRecord;

/// Key the progress document is stored under.
pub const PROGRESS_KEY: &str = "training_progress";

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Older builds wrote dates like `Tue Nov 14 2023`.
const LEGACY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage unavailable")]
    Unavailable,
}

//
// ─── PERSISTED DOCUMENT ───────────────────────────────────────────────────────
//

/// Persisted shape of the progress record.
///
/// Every field is optional on read: a missing field or an explicit `null`
/// loads as its default, so documents written by older builds still load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub stars: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub daily_progress: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
    #[serde(rename = "completedScenarios", deserialize_with = "null_as_default")]
    pub completed: Vec<String>,
    pub last_date: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ProgressDocument {
    #[must_use]
    pub fn from_record(record: &ProgressRecord) -> Self {
        Self {
            stars: record.stars(),
            daily_progress: u32::from(record.daily_progress().percent()),
            achievements: record.achievements().to_vec(),
            completed: record.completed().iter().cloned().collect(),
            last_date: record
                .last_saved()
                .map(|day| day.format(DATE_FORMAT).to_string()),
        }
    }

    /// Date the document was saved on, if it can be read.
    #[must_use]
    pub fn last_saved(&self) -> Option<NaiveDate> {
        let raw = self.last_date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_DATE_FORMAT))
            .ok()
    }

    /// Rebuild the domain record.
    ///
    /// An unreadable date is treated as "not today" so the daily counter
    /// rolls over on load.
    #[must_use]
    pub fn into_record(self) -> ProgressRecord {
        let last_saved = self.last_saved();
        if last_saved.is_none() && self.last_date.is_some() {
            debug!(raw = ?self.last_date, "ignoring unreadable progress date");
        }
        ProgressRecord::from_persisted(
            self.stars,
            self.daily_progress,
            self.achievements,
            self.completed,
            last_saved,
        )
    }

    /// Serialize to the JSON stored on disk.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Parse a stored JSON document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the text is not a progress
    /// document.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

//
// ─── REPOSITORY CONTRACT ──────────────────────────────────────────────────────
//

/// Repository contract for the single progress document.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the stored document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read or the stored
    /// document cannot be decoded. A missing document is `Ok(None)`.
    async fn load_progress(&self) -> Result<Option<ProgressDocument>, StorageError>;

    /// Overwrite the stored document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    async fn save_progress(&self, document: &ProgressDocument) -> Result<(), StorageError>;
}

/// In-memory key-value store for tests and previews.
///
/// Availability can be switched off to simulate a full or blocked medium.
#[derive(Clone)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
    available: Arc<AtomicBool>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Make every subsequent read and write fail (or succeed again).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Store raw text under a key, bypassing encoding.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.into());
        Ok(())
    }

    /// Raw text stored under a key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self) -> Result<Option<ProgressDocument>, StorageError> {
        self.ensure_available()?;
        self.get_raw(PROGRESS_KEY)?
            .map(|raw| ProgressDocument::from_json(&raw))
            .transpose()
    }

    async fn save_progress(&self, document: &ProgressDocument) -> Result<(), StorageError> {
        self.ensure_available()?;
        self.put_raw(PROGRESS_KEY, document.to_json()?)
    }
}

/// Aggregates repository trait objects for the services layer.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_progress(Arc::new(InMemoryRepository::new()))
    }

    #[must_use]
    pub fn with_progress(progress: Arc<dyn ProgressRepository>) -> Self {
        Self { progress }
    }
}
