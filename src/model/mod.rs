//! Domain model for the BabyTracker API
//!
//! These types match the JSON representations exchanged with the
//! server-side API. An entity with a `url` is persisted server-side; a
//! `url` of `None` marks a transient instance that has not been saved yet.

mod entry;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

pub use entry::*;

/// Anything addressable on the server through its own URL.
///
/// This is the shared seam behind the client's generic `refresh` and
/// `save` operations: a resource knows where it lives, and how to rebuild
/// itself from a decoded JSON response.
pub trait Resource: Serialize {
    /// The server URL for this resource, if it has been persisted
    fn url(&self) -> Option<&str>;

    /// Build a resource from a decoded JSON response
    fn from_value(value: Value) -> Result<Self, Error>
    where
        Self: Sized;
}

/// A registered user and the babies they track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// API root for this user
    pub url: Option<String>,

    /// The user's email address
    pub email: Option<String>,

    /// The user's full name
    pub name: Option<String>,

    /// Babies owned by this user, in server order
    #[serde(default)]
    pub babies: Vec<Baby>,
}

impl Resource for User {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }
}

/// A baby belonging to exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baby {
    /// API URL for this baby. May change when the baby is renamed.
    pub url: Option<String>,

    /// The baby's name
    pub name: Option<String>,

    /// Date of birth
    pub dob: Option<NaiveDate>,

    /// Gender
    pub gender: Option<Gender>,
}

impl Baby {
    /// Create a transient baby, ready to be added to a user
    pub fn new(name: &str, dob: NaiveDate, gender: Gender) -> Self {
        Self {
            url: None,
            name: Some(name.to_string()),
            dob: Some(dob),
            gender: Some(gender),
        }
    }
}

impl Resource for Baby {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }
}

/// A baby's gender, `m` or `f` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}
