//! Local session and preference cache
//!
//! Persists the logged-in user's snapshot and the mobile UI's preferences
//! in device-local key-value storage. Reads are defensive: a stored value
//! that fails to parse is treated as absent, the corrupt key is purged and
//! a diagnostic logged. Cache problems never propagate to callers.

mod storage;

use serde::{de::DeserializeOwned, Serialize};

use crate::model::{EntryType, User};
use crate::BabyTracker;

pub use storage::*;

const USER_KEY: &str = "user";
const DEFAULT_ENTRY_TYPE_KEY: &str = "prefs.defaultEntryType";
const DAYS_OF_HISTORY_KEY: &str = "prefs.daysOfHistory";
const INACTIVE_BABIES_KEY: &str = "prefs.inactiveBabies";

const DEFAULT_DAYS_OF_HISTORY: u32 = 14;

/// Normalize a baby name into a stable identifier.
///
/// Only the first space is replaced with a hyphen before lower-casing,
/// matching the identifiers already written by the web client. Multi-word
/// names can therefore collide.
pub fn normalized_name(name: &str) -> String {
    name.replacen(' ', "-", 1).to_lowercase()
}

/// Device-local cache of the session user and UI preferences.
///
/// Values are stored JSON-encoded under fixed keys. Accessors take
/// `&mut self` because a corrupt value is purged as it is discovered.
pub struct LocalCache<S: Storage> {
    storage: S,
}

impl<S: Storage> LocalCache<S> {
    /// Create a cache over the given storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn get_json<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = self.storage.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("purging invalid value {:?} under key {:?}: {}", raw, key, err);
                self.storage.remove(key);
                None
            }
        }
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.storage.set(key, raw),
            Err(err) => log::error!("failed to encode value for key {:?}: {}", key, err),
        }
    }

    /// The cached user snapshot. A pure read: never touches the network.
    pub fn user(&mut self) -> Option<User> {
        self.get_json(USER_KEY)
    }

    /// Cache a user snapshot, or clear it with `None`
    pub fn set_user(&mut self, user: Option<&User>) {
        match user {
            Some(user) => self.set_json(USER_KEY, user),
            None => self.storage.remove(USER_KEY),
        }
    }

    /// The cached user, re-validated against the server.
    ///
    /// Fetches the user's canonical representation through `client`. On
    /// success the cache is overwritten with the fresh copy and that copy
    /// is returned; on ANY failure the cached user is cleared and `None`
    /// is returned, so a stale session always reads as logged out.
    pub async fn refreshed_user(&mut self, client: &BabyTracker) -> Option<User> {
        let cached = self.user()?;
        match client.refresh(&cached).await {
            Ok(fresh) => {
                self.set_user(Some(&fresh));
                Some(fresh)
            }
            Err(err) => {
                log::debug!("session re-validation failed, clearing cached user: {}", err);
                self.set_user(None);
                None
            }
        }
    }

    /// The entry type pre-selected on the quick-entry form
    pub fn default_entry_type(&mut self) -> EntryType {
        self.get_json(DEFAULT_ENTRY_TYPE_KEY)
            .unwrap_or(EntryType::BreastFeed)
    }

    /// Set the entry type pre-selected on the quick-entry form
    pub fn set_default_entry_type(&mut self, value: EntryType) {
        self.set_json(DEFAULT_ENTRY_TYPE_KEY, &value);
    }

    /// How many days of history the UI shows. Always at least one day;
    /// absent or non-positive stored values fall back to the default of 14.
    pub fn days_of_history(&mut self) -> u32 {
        match self.get_json::<u32>(DAYS_OF_HISTORY_KEY) {
            Some(days) if days > 0 => days,
            _ => DEFAULT_DAYS_OF_HISTORY,
        }
    }

    /// Set how many days of history the UI shows
    pub fn set_days_of_history(&mut self, value: u32) {
        self.set_json(DAYS_OF_HISTORY_KEY, &value);
    }

    /// Normalized names of babies hidden from the quick-entry forms
    pub fn inactive_babies(&mut self) -> Vec<String> {
        self.get_json(INACTIVE_BABIES_KEY).unwrap_or_default()
    }

    /// Replace the set of hidden babies. Names are normalized before they
    /// are stored.
    pub fn set_inactive_babies<I, T>(&mut self, names: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let normalized: Vec<String> = names
            .into_iter()
            .map(|name| normalized_name(name.as_ref()))
            .collect();
        self.set_json(INACTIVE_BABIES_KEY, &normalized);
    }

    /// Whether a baby is excluded from the quick-entry forms
    pub fn is_inactive(&mut self, name: &str) -> bool {
        let normalized = normalized_name(name);
        self.inactive_babies().iter().any(|n| *n == normalized)
    }
}
