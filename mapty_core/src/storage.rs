//! Workout list persistence.
//!
//! The whole list is one JSON array stored under a single key. Every save
//! replaces the previous value; loads never fail on bad data.

use crate::{Error, Result, Workout};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Key under which the workout list is stored
pub const STORAGE_KEY: &str = "workouts";

/// String key-value storage slot
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store keeping each key in `<dir>/<key>.json`
///
/// Reads take a shared lock. Writes go through a locked temp file in the
/// same directory that is synced and then renamed over the old value.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        file.unlock()?;
        read?;

        tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.path_for(key);

        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Removed {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Serialize the whole list and replace whatever was stored under `key`
pub fn save_workouts<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    workouts: &[Workout],
) -> Result<()> {
    let contents = serde_json::to_string(workouts)?;
    store.set(key, &contents)?;
    tracing::debug!("Saved {} workouts under '{}'", workouts.len(), key);
    Ok(())
}

/// Load the stored list in stored order
///
/// A missing, unreadable or unparseable value yields an empty list. Derived
/// fields are recomputed rather than trusted.
pub fn load_workouts<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Vec<Workout> {
    let contents = match store.get(key) {
        Ok(Some(contents)) => contents,
        Ok(None) => {
            tracing::info!("No saved workouts under '{}', starting empty", key);
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("Unable to read saved workouts: {}. Starting empty.", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Workout>>(&contents) {
        Ok(mut workouts) => {
            workouts.iter_mut().for_each(Workout::recompute);
            tracing::debug!("Loaded {} workouts from '{}'", workouts.len(), key);
            workouts
        }
        Err(e) => {
            tracing::warn!("Failed to parse saved workouts: {}. Starting empty.", e);
            Vec::new()
        }
    }
}
