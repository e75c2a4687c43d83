use std::{
    collections::{BTreeMap, HashMap},
    fmt::Debug,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{config::project_dirs, error::StorageError};

pub const SELECTED_CITY_KEY: &str = "selected_city";
pub const SEARCH_HISTORY_KEY: &str = "search_history";

/// String key-value storage for the little state that outlives a session.
pub trait KeyValueStore: Send + Sync + Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// All keys in one JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory, e.g. `~/.local/share/weather-dash/state.json`.
    pub fn in_data_dir() -> Result<Self, StorageError> {
        let dirs = project_dirs().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join("state.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StorageError::Io { path: self.path.clone(), source }),
        };

        serde_json::from_str(&contents)
            .map_err(|source| StorageError::Corrupt { path: self.path.clone(), source })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut entries = match self.read_all() {
            Err(StorageError::Corrupt { .. }) => BTreeMap::new(),
            other => other?,
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| StorageError::Io { path: parent.to_path_buf(), source })?;
        }

        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json)
            .map_err(|source| StorageError::Io { path: self.path.clone(), source })
    }
}

/// Process-local store; nothing survives the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
