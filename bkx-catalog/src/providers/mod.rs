//! Upstream providers
//!
//! Two independent providers feed the services:
//! - [`BookCatalog`]: search, work metadata, author records, ratings
//! - [`Encyclopedia`]: free-text page summaries used as the author-bio fallback
//!
//! Services hold these as `Arc<dyn …>` so tests can substitute in-memory fakes.

mod http;
pub mod open_library;
pub mod types;
pub mod wikipedia;

use crate::error::ProviderResult;
use async_trait::async_trait;

pub use open_library::OpenLibraryClient;
pub use types::{
    AuthorRecord, KeyRef, PageSummary, RatingsRecord, RatingsSummary, RichText, SearchDoc,
    SearchResponse, SentenceField, WorkAuthorRef, WorkRecord,
};
pub use wikipedia::WikipediaClient;

/// Bibliographic catalog (search, works, authors, ratings)
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// Title search capped at `limit` records
    async fn search(&self, query: &str, limit: usize) -> ProviderResult<SearchResponse>;

    /// Canonical record for a work key such as `/works/OL66554W`
    async fn work(&self, work_id: &str) -> ProviderResult<WorkRecord>;

    /// Author record for a key such as `/authors/OL21594A`
    async fn author(&self, author_key: &str) -> ProviderResult<AuthorRecord>;

    /// Rating histogram and/or summary for a work key
    async fn ratings(&self, work_id: &str) -> ProviderResult<RatingsRecord>;
}

/// Encyclopedia summary lookup by free-text page name
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    async fn page_summary(&self, name: &str) -> ProviderResult<PageSummary>;
}
