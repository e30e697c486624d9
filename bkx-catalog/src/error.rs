//! Error types for bkx-catalog
//!
//! Provider calls fail with [`ProviderError`]. Search wraps it in
//! [`SearchError`]; detail aggregation swallows it and only reports
//! [`AggregationError`] for the defensive catch-all.

use thiserror::Error;

/// Upstream provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection failure, timeout or unreadable body
    #[error("Network error calling {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    /// Upstream answered with a non-2xx status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Response body was not the expected JSON shape
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl ProviderError {
    /// Network failures and non-2xx statuses; everything except decoding
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Status { .. })
    }

    pub fn endpoint(&self) -> &str {
        match self {
            Self::Network { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
            Self::Setup(_) => "",
        }
    }
}

/// Search failure surfaced to callers
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search failed: {0}")]
    Failed(#[from] ProviderError),
}

/// Detail aggregation failure outside the isolated sub-steps
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("Detail aggregation for {work_id} was interrupted unexpectedly")]
    Interrupted { work_id: String },
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let network = ProviderError::Network {
            endpoint: "https://x/search.json".to_string(),
            message: "timed out".to_string(),
        };
        let status = ProviderError::Status {
            endpoint: "https://x/works/OL1W.json".to_string(),
            status: 503,
        };
        let decode = ProviderError::Decode {
            endpoint: "https://x/works/OL1W.json".to_string(),
            message: "expected value".to_string(),
        };

        assert!(network.is_transport());
        assert!(status.is_transport());
        assert!(!decode.is_transport());
        assert_eq!(status.endpoint(), "https://x/works/OL1W.json");
    }

    #[test]
    fn test_search_error_message() {
        let err = SearchError::from(ProviderError::Status {
            endpoint: "https://x/search.json".to_string(),
            status: 500,
        });
        assert_eq!(
            err.to_string(),
            "Search failed: https://x/search.json returned HTTP 500"
        );
    }
}
