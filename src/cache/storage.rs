//! Key-value storage backends for the local cache

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Device-local key-value storage, string keys to string values.
///
/// Access is synchronous and infallible from the caller's point of view;
/// backends absorb and log their own I/O problems.
pub trait Storage {
    /// The value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: String);

    /// Remove `key` and its value, if present
    fn remove(&mut self, key: &str);
}

/// In-memory storage. Lives as long as the process, which makes it the
/// session-scoped backend and the natural test double.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Storage persisted as a single JSON object in a file.
///
/// The whole map is loaded when the store is opened and written back on
/// every mutation. An unreadable or corrupt file is treated as an empty
/// store; write failures are logged and otherwise absorbed.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStorage {
    /// Open the store backed by `path`, creating it on first write
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                log::warn!("ignoring corrupt storage file {}: {}", path.display(), err);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self { path, values }
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.values) {
            Ok(text) => {
                if let Err(err) = fs::write(&self.path, text) {
                    log::error!("failed to write {}: {}", self.path.display(), err);
                }
            }
            Err(err) => log::error!("failed to encode {}: {}", self.path.display(), err),
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.persist();
        }
    }
}
