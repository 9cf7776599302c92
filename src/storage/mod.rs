//! Key-value persistence for the working document.
//!
//! The working document is stored as a JSON array of paragraph strings under
//! one fixed key. Anything unreadable under that key counts as "nothing saved".

use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub const TEXT_KEY: &str = "reader_text";
const DATA_DIRNAME: &str = "pacer";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Cannot encode document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("No data directory available on this platform")]
    NoDataDir,
}

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/pacer`
    pub fn default_dir() -> Result<PathBuf, StorageError> {
        dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .map(|base| base.join(DATA_DIRNAME))
            .ok_or(StorageError::NoDataDir)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

/// In-process store, used in tests and when no data directory exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Saves and restores the paragraph list of the working document.
pub struct TextStore {
    store: Box<dyn KeyValueStore>,
}

impl TextStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    pub fn save<S: AsRef<str>>(&mut self, paragraphs: &[S]) -> Result<(), StorageError> {
        let paragraphs: Vec<&str> = paragraphs.iter().map(|p| p.as_ref()).collect();
        let encoded = serde_json::to_string(&paragraphs)?;
        self.store.set(TEXT_KEY, &encoded)?;
        debug!("saved {} paragraphs", paragraphs.len());
        Ok(())
    }

    /// Saved paragraphs, or `None` when nothing usable is stored.
    pub fn load(&self) -> Option<Vec<String>> {
        let raw = match self.store.get(TEXT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("cannot read saved text: {}", err);
                return None;
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(paragraphs) => {
                info!("restored {} saved paragraphs", paragraphs.len());
                Some(paragraphs)
            }
            Err(err) => {
                warn!("ignoring corrupt saved text: {}", err);
                None
            }
        }
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(TEXT_KEY)?;
        info!("cleared saved text");
        Ok(())
    }
}
