//! Author biography resolution
//!
//! Ordered fallback chain, stopping at the first non-empty result:
//! 1. Catalog author record (needs an author key from the work record)
//! 2. Encyclopedia page summary (needs an author name hint)
//! 3. Synthesized sentence from the name hint, or the generic fallback
//!
//! A failing tier counts as "no result" and never aborts the chain.

use crate::error::ProviderResult;
use crate::models::NO_AUTHOR_INFO;
use crate::providers::{BookCatalog, Encyclopedia};
use bkx_common::clean_text;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where the final biography came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioSource {
    CatalogRecord,
    Encyclopedia,
    /// Sentence built from the name hint
    Synthesized,
    /// Nothing known about the author at all
    Generic,
}

/// Tiers that call an upstream provider, in order
const PROVIDER_TIERS: [BioSource; 2] = [BioSource::CatalogRecord, BioSource::Encyclopedia];

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorBio {
    pub text: String,
    pub source: BioSource,
}

/// Final fallback text for an optional author name
pub fn synthesized_bio(name_hint: Option<&str>) -> AuthorBio {
    match name_hint {
        Some(name) => AuthorBio {
            text: format!(
                "{} is the author of this book. Detailed biographical information is currently unavailable from public sources.",
                name
            ),
            source: BioSource::Synthesized,
        },
        None => AuthorBio {
            text: NO_AUTHOR_INFO.to_string(),
            source: BioSource::Generic,
        },
    }
}

pub struct AuthorBioResolver {
    catalog: Arc<dyn BookCatalog>,
    encyclopedia: Arc<dyn Encyclopedia>,
}

impl AuthorBioResolver {
    pub fn new(catalog: Arc<dyn BookCatalog>, encyclopedia: Arc<dyn Encyclopedia>) -> Self {
        Self {
            catalog,
            encyclopedia,
        }
    }

    /// Resolve a biography. Never fails.
    ///
    /// `author_key` comes from the work record and is `None` when that
    /// record was unavailable or listed no authors.
    pub async fn resolve(&self, author_key: Option<&str>, name_hint: Option<&str>) -> AuthorBio {
        let name_hint = name_hint.map(str::trim).filter(|name| !name.is_empty());

        for tier in PROVIDER_TIERS {
            match self.attempt(tier, author_key, name_hint).await {
                Ok(Some(text)) => {
                    debug!(tier = ?tier, "Author biography resolved");
                    return AuthorBio { text, source: tier };
                }
                Ok(None) => debug!(tier = ?tier, "No biography from tier"),
                Err(e) => warn!(tier = ?tier, error = %e, "Biography tier failed, falling through"),
            }
        }

        synthesized_bio(name_hint)
    }

    /// One provider tier. `Ok(None)` means the tier was skipped or came back empty.
    async fn attempt(
        &self,
        tier: BioSource,
        author_key: Option<&str>,
        name_hint: Option<&str>,
    ) -> ProviderResult<Option<String>> {
        match tier {
            BioSource::CatalogRecord => {
                let Some(key) = author_key else {
                    return Ok(None);
                };
                let record = self.catalog.author(key).await?;
                Ok(record.bio.as_ref().and_then(|bio| clean_text(bio.as_str())))
            }
            BioSource::Encyclopedia => {
                let Some(name) = name_hint else {
                    return Ok(None);
                };
                // Extracts are used verbatim; only blank ones fall through
                let summary = self.encyclopedia.page_summary(name).await?;
                Ok(summary.extract.filter(|extract| !extract.trim().is_empty()))
            }
            BioSource::Synthesized | BioSource::Generic => Ok(None),
        }
    }
}
