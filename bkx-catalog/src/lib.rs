//! bkx-catalog library interface
//!
//! Book search and detail aggregation over public catalog and encyclopedia
//! APIs:
//! - [`SearchService`]: free-text query → normalized [`BookSummary`] list
//! - [`DetailAggregator`]: work id (+ author name hint) → always-populated
//!   [`DetailResult`], isolating every upstream failure
//! - [`session`]: caller-side debounce and latest-wins sequencing

pub mod error;
pub mod models;
pub mod providers;
pub mod render;
pub mod services;
pub mod session;

pub use crate::error::{AggregationError, ProviderError, ProviderResult, SearchError};
pub use crate::models::{BookSummary, DetailResult, Rating};
pub use crate::services::{author_hint_for, DetailAggregator, SearchService};

use bkx_common::ProviderSettings;
use providers::{BookCatalog, Encyclopedia, OpenLibraryClient, WikipediaClient};
use std::sync::Arc;

/// Search and detail services wired to the same providers
pub struct BookExplorer {
    pub search: Arc<SearchService>,
    pub details: Arc<DetailAggregator>,
}

impl BookExplorer {
    /// Wire arbitrary providers (tests use in-memory fakes)
    pub fn new(
        catalog: Arc<dyn BookCatalog>,
        encyclopedia: Arc<dyn Encyclopedia>,
        settings: &ProviderSettings,
    ) -> Self {
        Self {
            search: Arc::new(SearchService::new(catalog.clone(), settings)),
            details: Arc::new(DetailAggregator::new(catalog, encyclopedia)),
        }
    }

    /// Wire the production HTTP clients
    pub fn from_settings(settings: &ProviderSettings) -> ProviderResult<Self> {
        let catalog: Arc<dyn BookCatalog> = Arc::new(OpenLibraryClient::new(settings)?);
        let encyclopedia: Arc<dyn Encyclopedia> = Arc::new(WikipediaClient::new(settings)?);
        Ok(Self::new(catalog, encyclopedia, settings))
    }

    /// Details for a selected search result, using its first author as hint
    pub async fn details_for(&self, book: &BookSummary) -> DetailResult {
        self.details.get_details(&book.id, author_hint_for(book)).await
    }
}
