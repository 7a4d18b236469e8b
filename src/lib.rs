//! BabyTracker Rust Client Library
//!
//! A Rust client library for the BabyTracker REST API, covering endpoint
//! discovery, login/logout, user/baby/entry operations, and a device-local
//! cache for the session user and UI preferences.
//!
//! # Example
//!
//! ```no_run
//! use babytracker_client::BabyTracker;
//! use babytracker_client::cache::{LocalCache, MemoryStorage};
//!
//! # async fn run() -> Result<(), babytracker_client::error::Error> {
//! let tracker = BabyTracker::new("https://tracker.example.org/api/")?;
//! tracker.initialize().await?;
//!
//! let user = tracker.login("test@example.org", "secret").await?;
//!
//! let mut cache = LocalCache::new(MemoryStorage::new());
//! cache.set_user(Some(&user));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::model::{Baby, Entry, EntryType, Resource, User};

/// Login and logout endpoints discovered from the service root
#[derive(Debug, Clone, Deserialize)]
struct Endpoints {
    login_url: String,
    logout_url: String,
}

/// Optional filters for an entry listing. An absent field means no filter
/// on that axis.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    /// Earliest entry start to include
    pub start: Option<DateTime<Utc>>,

    /// Latest entry start to include
    pub end: Option<DateTime<Utc>>,

    /// Restrict the listing to a single entry type
    pub entry_type: Option<EntryType>,
}

impl EntryQuery {
    fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        if let Some(start) = self.start {
            params.insert("start".to_string(), start.to_rfc3339());
        }
        if let Some(end) = self.end {
            params.insert("end".to_string(), end.to_rfc3339());
        }
        if let Some(entry_type) = self.entry_type {
            params.insert("entry_type".to_string(), entry_type.as_str().to_string());
        }
        params
    }
}

/// The main entry point for the BabyTracker Rust client.
///
/// Every operation is a single request/response exchange; nothing is
/// retried and overlapping saves to the same entity are resolved by the
/// server as last-write-wins. Sessions ride on cookies, which the shared
/// HTTP client stores across calls.
pub struct BabyTracker {
    /// The API root URL
    pub url: String,

    /// Client options
    pub options: ClientOptions,

    /// HTTP client used for requests, with its cookie store
    http_client: Client,

    /// Endpoints discovered from the service root
    endpoints: Mutex<Option<Endpoints>>,

    /// The user of the active session, if any
    current_user: Mutex<Option<User>>,
}

impl BabyTracker {
    /// Create a new BabyTracker client for the given API root URL
    pub fn new(url: &str) -> Result<Self, Error> {
        Self::new_with_options(url, ClientOptions::default())
    }

    /// Create a new BabyTracker client with custom options
    pub fn new_with_options(url: &str, options: ClientOptions) -> Result<Self, Error> {
        Url::parse(url)?;

        let mut builder = Client::builder()
            .cookie_store(true)
            .user_agent(options.user_agent.clone());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            url: url.to_string(),
            options,
            http_client,
            endpoints: Mutex::new(None),
            current_user: Mutex::new(None),
        })
    }

    /// Discover the login and logout endpoints from the service root.
    ///
    /// Must complete successfully before [`login`](Self::login) or
    /// [`logout`](Self::logout); until then session operations fail with
    /// [`Error::NotInitialized`] rather than guessing endpoint URLs.
    pub async fn initialize(&self) -> Result<(), Error> {
        let endpoints = Fetch::get(&self.http_client, &self.url)
            .execute::<Endpoints>()
            .await?;

        let mut current = self.endpoints.lock().unwrap();
        *current = Some(endpoints);

        Ok(())
    }

    /// Log in with a username and password.
    ///
    /// On success the returned user, with its babies, becomes the active
    /// session subject. On failure the server's status and error payload
    /// surface as [`Error::Api`]; HTTP 401 is recognisable through
    /// [`Error::is_auth_failure`] so the UI can report a login failure
    /// specifically.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, Error> {
        let url = self.resolve(&self.login_url()?)?;

        let mut body = HashMap::new();
        body.insert("username".to_string(), username.to_string());
        body.insert("password".to_string(), password.to_string());

        let user = Fetch::post(&self.http_client, &url)
            .json(&body)?
            .execute::<User>()
            .await?;

        let mut current = self.current_user.lock().unwrap();
        *current = Some(user.clone());

        Ok(user)
    }

    /// Log out, terminating the remote session.
    ///
    /// Clears the active session subject. Any [`LocalCache`] is the
    /// caller's to clear.
    ///
    /// [`LocalCache`]: crate::cache::LocalCache
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.resolve(&self.logout_url()?)?;

        Fetch::post(&self.http_client, &url).execute_empty().await?;

        let mut current = self.current_user.lock().unwrap();
        *current = None;

        Ok(())
    }

    /// The user of the active session, as returned by the last login
    pub fn current_user(&self) -> Option<User> {
        let current = self.current_user.lock().unwrap();
        current.clone()
    }

    /// Re-fetch a resource's canonical representation from the server
    pub async fn refresh<R: Resource>(&self, resource: &R) -> Result<R, Error> {
        let url = self.entity_url(resource)?;

        let value = Fetch::get(&self.http_client, &url)
            .execute::<Value>()
            .await?;

        R::from_value(value)
    }

    /// Save a resource, sending its entire current state.
    ///
    /// The server applies the write unconditionally; of overlapping saves
    /// to the same entity, the last one to arrive wins.
    pub async fn save<R: Resource>(&self, resource: &R) -> Result<R, Error> {
        let url = self.entity_url(resource)?;

        let value = Fetch::put(&self.http_client, &url)
            .json(resource)?
            .execute::<Value>()
            .await?;

        R::from_value(value)
    }

    /// Create a new baby under a user.
    ///
    /// The created baby is appended to the user's list and returned.
    pub async fn add_baby(&self, user: &mut User, baby: &Baby) -> Result<Baby, Error> {
        let url = self.entity_url(&*user)?;

        let value = Fetch::post(&self.http_client, &url)
            .json(baby)?
            .execute::<Value>()
            .await?;

        let baby = Baby::from_value(value)?;
        user.babies.push(baby.clone());

        Ok(baby)
    }

    /// Delete a baby. Returns the parent user as refreshed by the server.
    pub async fn delete_baby(&self, baby: &Baby) -> Result<User, Error> {
        let url = self.entity_url(baby)?;

        let value = Fetch::delete(&self.http_client, &url)
            .execute::<Value>()
            .await?;

        User::from_value(value)
    }

    /// List a baby's entries, optionally filtered by date range and entry
    /// type.
    ///
    /// Each element is built through the entry factory, so an unknown
    /// `entry_type` tag anywhere in the response fails the whole call with
    /// [`Error::UnknownEntryType`].
    pub async fn entries(&self, baby: &Baby, query: EntryQuery) -> Result<Vec<Entry>, Error> {
        let url = self.entity_url(baby)?;

        let values = Fetch::get(&self.http_client, &url)
            .query(query.to_params())
            .execute::<Vec<Value>>()
            .await?;

        values.into_iter().map(Entry::from_value).collect()
    }

    /// Log a new entry for a baby
    pub async fn add_entry(&self, baby: &Baby, entry: &Entry) -> Result<Entry, Error> {
        let url = self.entity_url(baby)?;

        let value = Fetch::post(&self.http_client, &url)
            .json(entry)?
            .execute::<Value>()
            .await?;

        Entry::from_value(value)
    }

    /// Delete an entry. Returns the parent baby as refreshed by the server.
    pub async fn delete_entry(&self, entry: &Entry) -> Result<Baby, Error> {
        let url = self.entity_url(entry)?;

        let value = Fetch::delete(&self.http_client, &url)
            .execute::<Value>()
            .await?;

        Baby::from_value(value)
    }

    fn login_url(&self) -> Result<String, Error> {
        let endpoints = self.endpoints.lock().unwrap();
        match *endpoints {
            Some(ref endpoints) => Ok(endpoints.login_url.clone()),
            None => Err(Error::NotInitialized),
        }
    }

    fn logout_url(&self) -> Result<String, Error> {
        let endpoints = self.endpoints.lock().unwrap();
        match *endpoints {
            Some(ref endpoints) => Ok(endpoints.logout_url.clone()),
            None => Err(Error::NotInitialized),
        }
    }

    /// Absolute URL for an entity that has been persisted server-side
    fn entity_url<R: Resource>(&self, resource: &R) -> Result<String, Error> {
        let url = resource.url().ok_or(Error::NotPersisted)?;
        self.resolve(url)
    }

    /// Resolve a possibly relative URL against the API root
    fn resolve(&self, url: &str) -> Result<String, Error> {
        let base = Url::parse(&self.url)?;
        Ok(base.join(url)?.to_string())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::cache::{FileStorage, LocalCache, MemoryStorage, Storage};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::model::{Baby, Entry, EntryType, Gender, User};
    pub use crate::{BabyTracker, EntryQuery};
}
