//! Request/response orchestration over the providers
//!
//! - `search_mapper`: query → normalized [`BookSummary`](crate::models::BookSummary) list
//! - `detail_aggregator`: work id → always-populated [`DetailResult`](crate::models::DetailResult)
//! - `author_bio`: ordered fallback chain for the author biography
//! - `rating`: histogram / summary rating computation

pub mod author_bio;
pub mod detail_aggregator;
pub mod rating;
pub mod search_mapper;

pub use author_bio::{synthesized_bio, AuthorBio, AuthorBioResolver, BioSource};
pub use detail_aggregator::DetailAggregator;
pub use rating::compute_rating;
pub use search_mapper::{author_hint_for, cover_urls, SearchService};
