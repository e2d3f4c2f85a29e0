//! HTTP tier endpoint
//!
//! Implements the `TierEndpoint` seam against the upstream agent data API:
//!
//! - `GET {base}/api/tier1/{tier1}`
//! - `GET {base}/api/tier2/{tier1}/{tier2}`
//! - `GET {base}/api/tier3/{tier1}/{tier2}/{tier3}`
//!
//! Each request has its own timeout, and transient failures retry with
//! exponential backoff (1s, 2s, 4s). Client errors (4xx) do not retry:
//! the upstream has answered, just not usefully.

use crate::config::FetcherConfig;
use crate::FetchError;
use async_trait::async_trait;
use osa_domain::traits::TierEndpoint;
use osa_domain::TierKey;
use serde_json::Value;
use std::time::Duration;

/// Reqwest-backed tier endpoint client
pub struct HttpTierEndpoint {
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl HttpTierEndpoint {
    /// Build a client from fetcher configuration
    pub fn from_config(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FetchError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            max_retries: config.max_retries.max(1),
        })
    }

    /// URL for one tier key
    fn url_for(&self, key: &TierKey) -> String {
        format!(
            "{}/api/{}/{}",
            self.base_url,
            key.level.as_str(),
            key.segments().join("/")
        )
    }

    /// One request attempt
    async fn fetch_once(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::MalformedPayload(format!("Failed to parse response: {}", e)))
    }

    /// Fetch with retry and exponential backoff
    async fn fetch_with_retry(&self, key: &TierKey) -> Result<Value, FetchError> {
        let url = self.url_for(key);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.fetch_once(&url).await {
                Ok(payload) => return Ok(payload),
                // The upstream answered; retrying a client error won't help
                Err(FetchError::Status(code)) if (400..500).contains(&code) => {
                    return Err(FetchError::Status(code));
                }
                Err(FetchError::MalformedPayload(msg)) => {
                    return Err(FetchError::MalformedPayload(msg));
                }
                Err(e) => {
                    tracing::debug!(key = %key, attempt = attempts + 1, error = %e, "tier fetch attempt failed");
                    last_error = Some(e);
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or(FetchError::RetriesExhausted(self.max_retries)))
    }
}

#[async_trait]
impl TierEndpoint for HttpTierEndpoint {
    type Error = FetchError;

    async fn fetch(&self, key: &TierKey) -> Result<Value, FetchError> {
        self.fetch_with_retry(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osa_domain::{Tier1, TierLevel, TierPath};

    fn endpoint_with_base(base: &str) -> HttpTierEndpoint {
        let mut config = FetcherConfig::default_test_config();
        config.base_url = base.to_string();
        config.max_retries = 1;
        config.timeout_secs = 1;
        HttpTierEndpoint::from_config(&config).unwrap()
    }

    #[test]
    fn test_url_layout() {
        let endpoint = endpoint_with_base("http://localhost:3000/");
        let path = TierPath::page(Tier1::StrategyPlans, "osa", "overview-dashboard");

        let k1 = TierKey::for_level(TierLevel::One, &path).unwrap();
        assert_eq!(
            endpoint.url_for(&k1),
            "http://localhost:3000/api/tier1/strategy-plans"
        );

        let k2 = TierKey::for_level(TierLevel::Two, &path).unwrap();
        assert_eq!(
            endpoint.url_for(&k2),
            "http://localhost:3000/api/tier2/strategy-plans/osa"
        );

        let k3 = TierKey::for_level(TierLevel::Three, &path).unwrap();
        assert_eq!(
            endpoint.url_for(&k3),
            "http://localhost:3000/api/tier3/strategy-plans/osa/overview-dashboard"
        );
    }

    #[tokio::test]
    async fn test_refused_connection_is_connection_error() {
        // Bind an ephemeral port, then drop the listener so the connect
        // is refused immediately instead of timing out
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let endpoint = endpoint_with_base(&format!("http://127.0.0.1:{}", port));
        let path = TierPath::category(Tier1::DxpTools);
        let key = TierKey::for_level(TierLevel::One, &path).unwrap();

        let result = endpoint.fetch(&key).await;
        assert!(matches!(result, Err(FetchError::Connection(_))));
    }
}
