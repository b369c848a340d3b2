use crate::models::MoodEntry;
use async_trait::async_trait;
use serde_json::Value;
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::{fs, sync::Mutex};
use tracing::{error, warn};

/// Where the journal lives between runs.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Never fails: missing or corrupt data loads as an empty journal.
    async fn load(&self) -> Vec<MoodEntry>;

    /// Replaces the stored snapshot as one unit.
    async fn save(&self, entries: &[MoodEntry]) -> io::Result<()>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn ensure_parent_dir(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).await,
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl EntryStore for JsonFileStore {
    async fn load(&self) -> Vec<MoodEntry> {
        match fs::read(&self.path).await {
            Ok(bytes) => decode_entries(&bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                error!("failed to read journal file {}: {err}", self.path.display());
                Vec::new()
            }
        }
    }

    async fn save(&self, entries: &[MoodEntry]) -> io::Result<()> {
        let payload = serde_json::to_vec_pretty(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let written = match fs::write(&tmp, payload).await {
            Ok(()) => fs::rename(&tmp, &self.path).await,
            Err(err) => Err(err),
        };
        if written.is_err() {
            let _ = fs::remove_file(&tmp).await;
        }
        written
    }
}

/// Keeps the serialized blob in memory; handy for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn with_blob(blob: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn load(&self) -> Vec<MoodEntry> {
        match self.blob.lock().await.as_deref() {
            Some(bytes) => decode_entries(bytes),
            None => Vec::new(),
        }
    }

    async fn save(&self, entries: &[MoodEntry]) -> io::Result<()> {
        let payload = serde_json::to_vec(entries)?;
        *self.blob.lock().await = Some(payload);
        Ok(())
    }
}

fn decode_entries(bytes: &[u8]) -> Vec<MoodEntry> {
    let items: Vec<Value> = match serde_json::from_slice(bytes) {
        Ok(items) => items,
        Err(err) => {
            error!("failed to parse journal data: {err}");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(index, "skipping unreadable journal entry: {err}");
                None
            }
        })
        .collect()
}
