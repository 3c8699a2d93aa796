//! Collection and page records as returned by the Gather API

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A user-curated list of wiki pages.
///
/// Field names follow the upstream `lstprop` keys so the structured
/// export mirrors what the wiki returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: u64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub public: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub review: bool,
    /// File name of the collection image, without namespace prefix
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub imageurl: Option<String>,
    #[serde(default)]
    pub imagewidth: Option<u32>,
    #[serde(default)]
    pub imageheight: Option<u32>,
    /// Member count as reported by the wiki
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub updated: Option<Timestamp>,
    #[serde(default)]
    pub owner: Option<String>,
    /// Filled in by the aggregator; absent from `list=lists` responses
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Collection {
    /// Bare record with only id and label set
    pub fn new(id: u64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            description: None,
            public: false,
            review: false,
            image: None,
            imageurl: None,
            imagewidth: None,
            imageheight: None,
            count: 0,
            updated: None,
            owner: None,
            pages: Vec::new(),
        }
    }

    /// Calendar date of the last update, if known
    pub fn updated_date(&self) -> Option<NaiveDate> {
        self.updated.as_ref().and_then(Timestamp::date)
    }
}

/// Member entry of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Last-update time, kept in the shape it arrived in.
///
/// MediaWiki sends ISO 8601 strings; numbers are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(i64),
    Text(String),
}

impl Timestamp {
    /// UTC calendar date, `None` when the value cannot be interpreted
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Epoch(secs) => DateTime::from_timestamp(*secs, 0).map(|dt| dt.date_naive()),
            Self::Text(s) => {
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Some(dt.naive_utc().date());
                }
                // TS_MW form: 20150601102030
                NaiveDateTime::parse_from_str(s, "%Y%m%d%H%M%S")
                    .ok()
                    .map(|dt| dt.date())
            }
        }
    }
}

/// Accept `true`/`false`, the legacy "present as empty string" encoding, or 0/1
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Num(i64),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Num(n)) => n != 0,
        Some(Flag::Text(_)) => true,
        None => false,
    })
}
