//! Normalized result types handed to callers
//!
//! Upstream payloads are heterogeneous and often partial; these shapes are
//! always fully populated with policy fallbacks.

use serde::{Deserialize, Serialize};

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_YEAR: &str = "N/A";
pub const NO_SHORT_DESCRIPTION: &str = "No description available.";
pub const NO_OVERVIEW: &str = "No overview available.";
pub const NO_AUTHOR_INFO: &str = "Author information not listed.";

/// One mapped search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    /// Opaque upstream key (`/works/OL…W`), later used as the detail lookup key
    pub id: String,
    pub title: String,
    /// Never empty; `["Unknown Author"]` when upstream lists nobody
    pub authors: Vec<String>,
    /// First publish year, or `"N/A"`
    pub published_year: String,
    pub short_description: String,
    pub average_rating: f64,
    pub ratings_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_small_thumbnail_url: Option<String>,
}

/// Average and vote count
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub average: f64,
    pub count: u64,
}

/// Aggregated detail page content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailResult {
    pub description: String,
    pub author_bio: String,
    pub rating: Rating,
}

impl Default for DetailResult {
    /// Placeholder state every aggregation starts from
    fn default() -> Self {
        Self {
            description: NO_OVERVIEW.to_string(),
            author_bio: NO_AUTHOR_INFO.to_string(),
            rating: Rating::default(),
        }
    }
}

/// Round to one decimal place
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
