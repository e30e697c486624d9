//! Detail aggregation
//!
//! Merges work metadata, author biography and ratings into one
//! [`DetailResult`]. The result starts in its placeholder state and each
//! isolated sub-step overwrites only the fields it resolved, so a caller
//! always receives a fully populated value.
//!
//! The ratings fetch has no data dependency on the work record and runs
//! concurrently with the description/biography chain.

use crate::error::AggregationError;
use crate::models::{DetailResult, Rating};
use crate::providers::{BookCatalog, Encyclopedia, WorkRecord};
use crate::services::author_bio::{AuthorBio, AuthorBioResolver};
use crate::services::rating::compute_rating;
use bkx_common::clean_text;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct DetailAggregator {
    catalog: Arc<dyn BookCatalog>,
    bio_resolver: AuthorBioResolver,
}

impl DetailAggregator {
    pub fn new(catalog: Arc<dyn BookCatalog>, encyclopedia: Arc<dyn Encyclopedia>) -> Self {
        Self {
            bio_resolver: AuthorBioResolver::new(catalog.clone(), encyclopedia),
            catalog,
        }
    }

    /// Aggregate details for `work_id`. Never fails.
    ///
    /// On an unexpected interruption every field keeps its placeholder value.
    pub async fn get_details(&self, work_id: &str, author_name_hint: Option<&str>) -> DetailResult {
        match self.try_get_details(work_id, author_name_hint).await {
            Ok(details) => details,
            Err(e) => {
                error!(work_id = %work_id, error = %e, "Returning placeholder details");
                DetailResult::default()
            }
        }
    }

    /// Like [`get_details`](Self::get_details) but reports the defensive
    /// catch-all to the caller instead of hiding it.
    ///
    /// Provider failures are never reported here; they only select fallbacks.
    pub async fn try_get_details(
        &self,
        work_id: &str,
        author_name_hint: Option<&str>,
    ) -> Result<DetailResult, AggregationError> {
        AssertUnwindSafe(self.aggregate(work_id, author_name_hint))
            .catch_unwind()
            .await
            .map_err(|_| AggregationError::Interrupted {
                work_id: work_id.to_string(),
            })
    }

    async fn aggregate(&self, work_id: &str, author_name_hint: Option<&str>) -> DetailResult {
        debug!(work_id = %work_id, hint = ?author_name_hint, "Aggregating book details");

        let mut result = DetailResult::default();

        let ((description, bio), rating) = tokio::join!(
            self.description_and_bio(work_id, author_name_hint),
            self.fetch_rating(work_id),
        );

        if let Some(description) = description {
            result.description = description;
        }
        result.author_bio = bio.text;
        if let Some(rating) = rating {
            result.rating = rating;
        }

        info!(
            work_id = %work_id,
            bio_source = ?bio.source,
            rating_count = result.rating.count,
            "Book details aggregated"
        );

        result
    }

    /// Steps 1 and 2: the bio chain depends on the author key in the work record
    async fn description_and_bio(
        &self,
        work_id: &str,
        author_name_hint: Option<&str>,
    ) -> (Option<String>, AuthorBio) {
        let work = self.fetch_work(work_id).await;

        let description = work
            .as_ref()
            .and_then(|w| w.description.as_ref())
            .and_then(|d| clean_text(d.as_str()));
        let author_key = work.as_ref().and_then(WorkRecord::first_author_key);

        let bio = self.bio_resolver.resolve(author_key, author_name_hint).await;

        (description, bio)
    }

    async fn fetch_work(&self, work_id: &str) -> Option<WorkRecord> {
        match self.catalog.work(work_id).await {
            Ok(work) => Some(work),
            Err(e) => {
                warn!(
                    work_id = %work_id,
                    error = %e,
                    "Work metadata unavailable, continuing with name hint only"
                );
                None
            }
        }
    }

    /// Step 3: isolated; `None` keeps the zero rating
    async fn fetch_rating(&self, work_id: &str) -> Option<Rating> {
        match self.catalog.ratings(work_id).await {
            Ok(record) => Some(compute_rating(&record)),
            Err(e) => {
                warn!(work_id = %work_id, error = %e, "Ratings unavailable, keeping zero rating");
                None
            }
        }
    }
}
