//! Entry variants: logged caregiving events for a baby

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Resource;
use crate::error::Error;

/// The closed set of entry kinds, as carried by the `entry_type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    BreastFeed,
    BottleFeed,
    MixedFeed,
    Sleep,
    NappyChange,
}

impl EntryType {
    /// The wire tag for this entry type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BreastFeed => "breast_feed",
            Self::BottleFeed => "bottle_feed",
            Self::MixedFeed => "mixed_feed",
            Self::Sleep => "sleep",
            Self::NappyChange => "nappy_change",
        }
    }

    /// Look up an entry type by its wire tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "breast_feed" => Some(Self::BreastFeed),
            "bottle_feed" => Some(Self::BottleFeed),
            "mixed_feed" => Some(Self::MixedFeed),
            "sleep" => Some(Self::Sleep),
            "nappy_change" => Some(Self::NappyChange),
            _ => None,
        }
    }
}

/// A logged caregiving event belonging to a baby.
///
/// Serializes with its `entry_type` tag alongside the variant fields, as
/// the server expects. Deserialization goes through [`Entry::from_value`],
/// which fails with [`Error::UnknownEntryType`] for tags outside the known
/// set instead of guessing a variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "entry_type", rename_all = "snake_case")]
pub enum Entry {
    BreastFeed(BreastFeed),
    BottleFeed(BottleFeed),
    MixedFeed(MixedFeed),
    Sleep(Sleep),
    NappyChange(NappyChange),
}

impl Entry {
    /// Build an entry from a decoded JSON object carrying an `entry_type`
    /// tag and the fields of that variant.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let tag = value
            .get("entry_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match tag.as_str() {
            "breast_feed" => Ok(Entry::BreastFeed(serde_json::from_value(value)?)),
            "bottle_feed" => Ok(Entry::BottleFeed(serde_json::from_value(value)?)),
            "mixed_feed" => Ok(Entry::MixedFeed(serde_json::from_value(value)?)),
            "sleep" => Ok(Entry::Sleep(serde_json::from_value(value)?)),
            "nappy_change" => Ok(Entry::NappyChange(serde_json::from_value(value)?)),
            _ => Err(Error::UnknownEntryType(tag)),
        }
    }

    /// The kind of this entry
    pub fn entry_type(&self) -> EntryType {
        match self {
            Entry::BreastFeed(_) => EntryType::BreastFeed,
            Entry::BottleFeed(_) => EntryType::BottleFeed,
            Entry::MixedFeed(_) => EntryType::MixedFeed,
            Entry::Sleep(_) => EntryType::Sleep,
            Entry::NappyChange(_) => EntryType::NappyChange,
        }
    }

    /// API URL for this entry, if it has been persisted
    pub fn url(&self) -> Option<&str> {
        match self {
            Entry::BreastFeed(e) => e.url.as_deref(),
            Entry::BottleFeed(e) => e.url.as_deref(),
            Entry::MixedFeed(e) => e.url.as_deref(),
            Entry::Sleep(e) => e.url.as_deref(),
            Entry::NappyChange(e) => e.url.as_deref(),
        }
    }

    /// When the event started
    pub fn start(&self) -> Option<DateTime<Utc>> {
        match self {
            Entry::BreastFeed(e) => e.start,
            Entry::BottleFeed(e) => e.start,
            Entry::MixedFeed(e) => e.start,
            Entry::Sleep(e) => e.start,
            Entry::NappyChange(e) => e.start,
        }
    }

    /// When the event ended
    pub fn end(&self) -> Option<DateTime<Utc>> {
        match self {
            Entry::BreastFeed(e) => e.end,
            Entry::BottleFeed(e) => e.end,
            Entry::MixedFeed(e) => e.end,
            Entry::Sleep(e) => e.end,
            Entry::NappyChange(e) => e.end,
        }
    }

    /// Free-form note attached to the event
    pub fn note(&self) -> Option<&str> {
        match self {
            Entry::BreastFeed(e) => e.note.as_deref(),
            Entry::BottleFeed(e) => e.note.as_deref(),
            Entry::MixedFeed(e) => e.note.as_deref(),
            Entry::Sleep(e) => e.note.as_deref(),
            Entry::NappyChange(e) => e.note.as_deref(),
        }
    }
}

impl Resource for Entry {
    fn url(&self) -> Option<&str> {
        Entry::url(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        Entry::from_value(value)
    }
}

impl From<BreastFeed> for Entry {
    fn from(e: BreastFeed) -> Self {
        Entry::BreastFeed(e)
    }
}

impl From<BottleFeed> for Entry {
    fn from(e: BottleFeed) -> Self {
        Entry::BottleFeed(e)
    }
}

impl From<MixedFeed> for Entry {
    fn from(e: MixedFeed) -> Self {
        Entry::MixedFeed(e)
    }
}

impl From<Sleep> for Entry {
    fn from(e: Sleep) -> Self {
        Entry::Sleep(e)
    }
}

impl From<NappyChange> for Entry {
    fn from(e: NappyChange) -> Self {
        Entry::NappyChange(e)
    }
}

/// A feed from the breast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreastFeed {
    pub url: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub note: Option<String>,

    /// Seconds fed on the left side
    pub left_duration: Option<i64>,

    /// Seconds fed on the right side
    pub right_duration: Option<i64>,
}

/// A feed from a bottle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BottleFeed {
    pub url: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub note: Option<String>,

    /// Millilitres given
    pub amount: Option<i64>,
}

/// A breast feed topped up from a bottle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixedFeed {
    pub url: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub left_duration: Option<i64>,
    pub right_duration: Option<i64>,

    /// Millilitres of top-up given
    pub topup: Option<i64>,
}

/// A period of sleep
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sleep {
    pub url: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub note: Option<String>,

    /// Seconds slept
    pub duration: Option<i64>,
}

/// A nappy change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NappyChange {
    pub url: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub contents: Option<NappyContents>,
}

/// What a changed nappy contained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NappyContents {
    Wet,
    Dirty,
}
