//! Open Library catalog client
//!
//! API Documentation: https://openlibrary.org/developers/api

use super::http::JsonFetcher;
use super::types::{AuthorRecord, RatingsRecord, SearchResponse, WorkRecord};
use super::BookCatalog;
use crate::error::ProviderResult;
use async_trait::async_trait;
use bkx_common::ProviderSettings;

/// Open Library API client
pub struct OpenLibraryClient {
    fetcher: JsonFetcher,
    /// Base for work, author and ratings records
    catalog_base_url: String,
    /// Base for `/search.json`
    search_base_url: String,
}

impl OpenLibraryClient {
    /// Build a client from validated settings
    pub fn new(settings: &ProviderSettings) -> ProviderResult<Self> {
        Ok(Self {
            fetcher: JsonFetcher::new(settings)?,
            catalog_base_url: settings.catalog_base_url.clone(),
            search_base_url: settings.search_base_url.clone(),
        })
    }

    pub fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/search.json?title={}&limit={}",
            self.search_base_url,
            urlencoding::encode(query),
            limit
        )
    }

    /// Upstream keys carry their own leading slash: `{base}{key}.json`
    pub fn record_url(&self, key: &str) -> String {
        format!("{}{}.json", self.catalog_base_url, key)
    }

    pub fn ratings_url(&self, work_id: &str) -> String {
        format!("{}{}/ratings.json", self.catalog_base_url, work_id)
    }
}

#[async_trait]
impl BookCatalog for OpenLibraryClient {
    async fn search(&self, query: &str, limit: usize) -> ProviderResult<SearchResponse> {
        let response: SearchResponse = self.fetcher.get_json(&self.search_url(query, limit)).await?;

        tracing::debug!(
            query = %query,
            docs = response.docs.len(),
            "Retrieved search results from Open Library"
        );

        Ok(response)
    }

    async fn work(&self, work_id: &str) -> ProviderResult<WorkRecord> {
        self.fetcher.get_json(&self.record_url(work_id)).await
    }

    async fn author(&self, author_key: &str) -> ProviderResult<AuthorRecord> {
        self.fetcher.get_json(&self.record_url(author_key)).await
    }

    async fn ratings(&self, work_id: &str) -> ProviderResult<RatingsRecord> {
        self.fetcher.get_json(&self.ratings_url(work_id)).await
    }
}
