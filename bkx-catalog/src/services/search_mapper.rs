//! Search mapping
//!
//! Calls the catalog search endpoint once and maps each raw record into a
//! [`BookSummary`] with defensive fallbacks for every optional field.

use crate::error::SearchError;
use crate::models::{
    round_one_decimal, BookSummary, NO_SHORT_DESCRIPTION, UNKNOWN_AUTHOR, UNKNOWN_YEAR,
};
use crate::providers::{BookCatalog, SearchDoc};
use bkx_common::ProviderSettings;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Medium and small cover URLs for a numeric cover id
pub fn cover_urls(cover_base_url: &str, cover_id: i64) -> (String, String) {
    (
        format!("{}/b/id/{}-M.jpg", cover_base_url, cover_id),
        format!("{}/b/id/{}-S.jpg", cover_base_url, cover_id),
    )
}

/// Author name hint for the detail lookup of a selected summary.
///
/// The `"Unknown Author"` placeholder is not a real name and yields `None`.
pub fn author_hint_for(book: &BookSummary) -> Option<&str> {
    book.authors
        .first()
        .map(String::as_str)
        .filter(|name| *name != UNKNOWN_AUTHOR && !name.trim().is_empty())
}

/// Search service
pub struct SearchService {
    catalog: Arc<dyn BookCatalog>,
    cover_base_url: String,
    limit: usize,
}

impl SearchService {
    pub fn new(catalog: Arc<dyn BookCatalog>, settings: &ProviderSettings) -> Self {
        Self {
            catalog,
            cover_base_url: settings.cover_base_url.clone(),
            limit: settings.search_limit,
        }
    }

    /// Search by free-text title query.
    ///
    /// A blank query returns an empty list without any upstream call. Any
    /// transport or decoding failure surfaces as [`SearchError::Failed`];
    /// no partial results are returned.
    pub async fn search(&self, query: &str) -> Result<Vec<BookSummary>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank query, skipping search");
            return Ok(Vec::new());
        }

        let response = self.catalog.search(query, self.limit).await.map_err(|e| {
            error!(query = %query, error = %e, "Search failed");
            SearchError::Failed(e)
        })?;

        let books: Vec<BookSummary> = response
            .docs
            .iter()
            .take(self.limit)
            .map(|doc| self.map_doc(doc))
            .collect();

        info!(query = %query, results = books.len(), "Search complete");

        Ok(books)
    }

    /// Map one raw search record
    pub fn map_doc(&self, doc: &SearchDoc) -> BookSummary {
        let authors: Vec<String> = doc
            .author_name
            .iter()
            .flatten()
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect();
        let authors = if authors.is_empty() {
            vec![UNKNOWN_AUTHOR.to_string()]
        } else {
            authors
        };

        let published_year = doc
            .first_publish_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string());

        let short_description = doc
            .first_sentence
            .as_ref()
            .and_then(|s| s.first())
            .filter(|sentence| !sentence.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| NO_SHORT_DESCRIPTION.to_string());

        let average_rating = doc
            .ratings_average
            .filter(|avg| avg.is_finite() && *avg >= 0.0)
            .map(round_one_decimal)
            .unwrap_or(0.0);

        let (cover_thumbnail_url, cover_small_thumbnail_url) = match doc.cover_i {
            Some(cover_id) => {
                let (medium, small) = cover_urls(&self.cover_base_url, cover_id);
                (Some(medium), Some(small))
            }
            None => (None, None),
        };

        BookSummary {
            id: doc.key.clone(),
            title: doc.title.clone(),
            authors,
            published_year,
            short_description,
            average_rating,
            ratings_count: doc.ratings_count.unwrap_or(0),
            cover_thumbnail_url,
            cover_small_thumbnail_url,
        }
    }
}
