//! Upstream wire types
//!
//! Every optional upstream field defaults, so a sparse payload decodes into
//! empty values instead of failing the whole call.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Prose field that arrives either as `"text"` or as `{"type": …, "value": "text"}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RichText {
    Plain(String),
    Wrapped {
        #[serde(default)]
        value: String,
    },
}

impl RichText {
    pub fn as_str(&self) -> &str {
        match self {
            RichText::Plain(text) => text,
            RichText::Wrapped { value } => value,
        }
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        RichText::Plain(text.to_string())
    }
}

/// `first_sentence` is a list in search documents but a single string in
/// some older payloads
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SentenceField {
    One(String),
    Many(Vec<String>),
}

impl SentenceField {
    pub fn first(&self) -> Option<&str> {
        match self {
            SentenceField::One(sentence) => Some(sentence.as_str()),
            SentenceField::Many(sentences) => sentences.first().map(String::as_str),
        }
    }
}

/// `GET {searchBase}/search.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// One search result record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDoc {
    /// Work key, e.g. `/works/OL66554W`
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_name: Option<Vec<String>>,
    #[serde(default)]
    pub first_publish_year: Option<i64>,
    #[serde(default)]
    pub first_sentence: Option<SentenceField>,
    #[serde(default)]
    pub ratings_average: Option<f64>,
    #[serde(default)]
    pub ratings_count: Option<u64>,
    /// Numeric cover identifier
    #[serde(default)]
    pub cover_i: Option<i64>,
}

/// `GET {base}{workId}.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkRecord {
    #[serde(default)]
    pub description: Option<RichText>,
    #[serde(default)]
    pub authors: Vec<WorkAuthorRef>,
}

impl WorkRecord {
    /// Key of the first listed author, if the work lists any
    pub fn first_author_key(&self) -> Option<&str> {
        self.authors
            .first()
            .and_then(|r| r.author.as_ref())
            .map(|a| a.key.as_str())
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkAuthorRef {
    #[serde(default)]
    pub author: Option<KeyRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyRef {
    #[serde(default)]
    pub key: String,
}

/// `GET {base}{authorKey}.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorRecord {
    #[serde(default)]
    pub bio: Option<RichText>,
}

/// `GET {base}{workId}/ratings.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingsRecord {
    /// Star value (`"1"`..`"5"`) to vote count
    #[serde(default, deserialize_with = "lenient_counts")]
    pub counts: Option<BTreeMap<String, u64>>,
    #[serde(default)]
    pub summary: Option<RatingsSummary>,
}

/// Histogram values that are not non-negative numbers drop only their own
/// entry; float counts are rounded.
fn lenient_counts<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;

    Ok(raw.map(|map| {
        map.into_iter()
            .filter_map(|(key, value)| vote_count(&value).map(|votes| (key, votes)))
            .collect()
    }))
}

fn vote_count(value: &serde_json::Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|votes| votes.is_finite() && *votes >= 0.0)
            .map(|votes| votes.round() as u64)
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingsSummary {
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// `GET {encyclopediaBase}/page/summary/{name}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageSummary {
    #[serde(default)]
    pub extract: Option<String>,
}
