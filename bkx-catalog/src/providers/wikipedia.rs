//! Wikipedia REST summary client
//!
//! Wikipedia blocks requests without an identifying User-Agent; the shared
//! fetcher sends the configured one on every call.

use super::http::JsonFetcher;
use super::types::PageSummary;
use super::Encyclopedia;
use crate::error::ProviderResult;
use async_trait::async_trait;
use bkx_common::ProviderSettings;

pub struct WikipediaClient {
    fetcher: JsonFetcher,
    base_url: String,
}

impl WikipediaClient {
    pub fn new(settings: &ProviderSettings) -> ProviderResult<Self> {
        Ok(Self {
            fetcher: JsonFetcher::new(settings)?,
            base_url: settings.encyclopedia_base_url.clone(),
        })
    }

    pub fn summary_url(&self, name: &str) -> String {
        format!("{}/page/summary/{}", self.base_url, urlencoding::encode(name))
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn page_summary(&self, name: &str) -> ProviderResult<PageSummary> {
        self.fetcher.get_json(&self.summary_url(name)).await
    }
}
