//! Shared JSON-over-HTTP plumbing for provider clients

use crate::error::{ProviderError, ProviderResult};
use bkx_common::ProviderSettings;
use governor::{Quota, RateLimiter};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::time::Duration;

type DirectLimiter = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// GETs JSON documents with one identifying User-Agent.
///
/// Holds no per-call state: no cookie store, no cached responses. A single
/// attempt is made per call.
pub(crate) struct JsonFetcher {
    client: Client,
    user_agent: String,
    /// Present only when `requests_per_second` is configured
    rate_limiter: Option<DirectLimiter>,
}

impl JsonFetcher {
    pub(crate) fn new(settings: &ProviderSettings) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()
            .map_err(|e| ProviderError::Setup(e.to_string()))?;

        let rate_limiter = settings
            .requests_per_second
            .and_then(NonZeroU32::new)
            .map(|rps| RateLimiter::direct(Quota::per_second(rps)));

        Ok(Self {
            client,
            user_agent: settings.user_agent.clone(),
            rate_limiter,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ProviderResult<T> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        tracing::debug!(endpoint = %url, "GET");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                endpoint: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                ProviderError::Decode {
                    endpoint: url.to_string(),
                    message: e.to_string(),
                }
            } else {
                ProviderError::Network {
                    endpoint: url.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }
}
