//! In-memory provider fakes
//!
//! Records are built from `serde_json::json!` literals so tests exercise the
//! same wire decoding the HTTP clients use. A key with no canned record
//! answers HTTP 404.

use async_trait::async_trait;
use bkx_catalog::providers::{
    AuthorRecord, BookCatalog, Encyclopedia, PageSummary, RatingsRecord, SearchResponse,
    WorkRecord,
};
use bkx_catalog::{ProviderError, ProviderResult};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

fn not_found<T>(endpoint: String) -> ProviderResult<T> {
    Err(ProviderError::Status {
        endpoint,
        status: 404,
    })
}

fn decode<T: serde::de::DeserializeOwned>(endpoint: &str, value: &Value) -> ProviderResult<T> {
    serde_json::from_value(value.clone()).map_err(|e| ProviderError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Fake catalog with canned JSON per key
#[derive(Default)]
pub struct FakeCatalog {
    search: Option<Value>,
    search_delays: HashMap<String, Duration>,
    works: HashMap<String, Value>,
    authors: HashMap<String, Value>,
    ratings: HashMap<String, Value>,
    /// Endpoints that fail with a network error
    offline: HashSet<String>,
    panic_on_work: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every search answers with this body
    pub fn with_search(mut self, body: Value) -> Self {
        self.search = Some(body);
        self
    }

    /// Delay the answer for one query (use with paused tokio time)
    pub fn with_search_delay(mut self, query: &str, delay: Duration) -> Self {
        self.search_delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_work(mut self, work_id: &str, body: Value) -> Self {
        self.works.insert(work_id.to_string(), body);
        self
    }

    pub fn with_author(mut self, author_key: &str, body: Value) -> Self {
        self.authors.insert(author_key.to_string(), body);
        self
    }

    pub fn with_ratings(mut self, work_id: &str, body: Value) -> Self {
        self.ratings.insert(work_id.to_string(), body);
        self
    }

    /// `call` is one of the recorded call labels, e.g. `"work:/works/OL1W"`
    pub fn offline(mut self, call: &str) -> Self {
        self.offline.insert(call.to_string());
        self
    }

    pub fn panicking_on_work(mut self) -> Self {
        self.panic_on_work = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, call: &str) -> bool {
        self.calls().iter().any(|c| c == call)
    }

    fn record(&self, call: String) -> ProviderResult<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.offline.contains(&call) {
            return Err(ProviderError::Network {
                endpoint: call,
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BookCatalog for FakeCatalog {
    async fn search(&self, query: &str, limit: usize) -> ProviderResult<SearchResponse> {
        let call = format!("search:{}", query);
        self.calls
            .lock()
            .unwrap()
            .push(format!("search-limit:{}", limit));
        self.record(call.clone())?;

        if let Some(delay) = self.search_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }

        match &self.search {
            Some(body) => decode(&call, body),
            None => Err(ProviderError::Network {
                endpoint: call,
                message: "search endpoint unreachable".to_string(),
            }),
        }
    }

    async fn work(&self, work_id: &str) -> ProviderResult<WorkRecord> {
        let call = format!("work:{}", work_id);
        self.record(call.clone())?;
        if self.panic_on_work {
            panic!("unexpected failure while reading work {}", work_id);
        }
        match self.works.get(work_id) {
            Some(body) => decode(&call, body),
            None => not_found(call),
        }
    }

    async fn author(&self, author_key: &str) -> ProviderResult<AuthorRecord> {
        let call = format!("author:{}", author_key);
        self.record(call.clone())?;
        match self.authors.get(author_key) {
            Some(body) => decode(&call, body),
            None => not_found(call),
        }
    }

    async fn ratings(&self, work_id: &str) -> ProviderResult<RatingsRecord> {
        let call = format!("ratings:{}", work_id);
        self.record(call.clone())?;
        match self.ratings.get(work_id) {
            Some(body) => decode(&call, body),
            None => not_found(call),
        }
    }
}

/// Fake encyclopedia with canned page summaries
#[derive(Default)]
pub struct FakeEncyclopedia {
    pages: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl FakeEncyclopedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, name: &str, body: Value) -> Self {
        self.pages.insert(name.to_string(), body);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Encyclopedia for FakeEncyclopedia {
    async fn page_summary(&self, name: &str) -> ProviderResult<PageSummary> {
        let call = format!("summary:{}", name);
        self.calls.lock().unwrap().push(call.clone());
        match self.pages.get(name) {
            Some(body) => decode(&call, body),
            None => not_found(call),
        }
    }
}
