//! HTTP transport for the routing API
//!
//! Two endpoints are used:
//!
//! - `GET {base_url}/transit?start=&goal=&start_time=&lang=` for route search
//! - `GET {base_url}/autocomplete?word=&lang=` for place suggestions
//!
//! Both return the raw [`wire`](crate::wire) documents; mapping to the
//! domain happens in the caller.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::wire::{WireAutocompleteResponse, WireResponse};

/// `start_time` format expected by the API (local wall-clock time, no offset)
pub(crate) const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const SUGGESTION_CACHE_CAPACITY: u64 = 1000;

/// Trait for routing API clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Search routes between two place names departing at a local time
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        departure: NaiveDateTime,
    ) -> Result<WireResponse, TransitError>;

    /// Fetch place suggestions for a partial name
    async fn autocomplete(&self, query: &str) -> Result<WireAutocompleteResponse, TransitError>;

    /// Check if the routing service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Routing API client over HTTP
#[derive(Debug)]
pub struct HttpTransitClient {
    client: Client,
    config: TransitConfig,
    suggestions: Option<Cache<String, WireAutocompleteResponse>>,
}

impl HttpTransitClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        config.validate().map_err(TransitError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("transit-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        let suggestions = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(SUGGESTION_CACHE_CAPACITY)
                .time_to_live(Duration::from_secs(u64::from(config.cache_ttl_minutes) * 60))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            suggestions,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Issue a GET and return the body of a successful response
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String, TransitError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    TransitError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))
    }

    fn parse_transit_response(body: &str) -> Result<WireResponse, TransitError> {
        WireResponse::from_json(body).map_err(|e| TransitError::ParseError(e.to_string()))
    }

    fn parse_autocomplete_response(body: &str) -> Result<WireAutocompleteResponse, TransitError> {
        WireAutocompleteResponse::from_json(body)
            .map_err(|e| TransitError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl TransitClient for HttpTransitClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        departure: NaiveDateTime,
    ) -> Result<WireResponse, TransitError> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err(TransitError::InvalidQuery(
                "start and goal must not be empty".to_string(),
            ));
        }

        let url = self.endpoint("transit");
        let start_time = departure.format(START_TIME_FORMAT).to_string();
        let params = [
            ("start", origin),
            ("goal", destination),
            ("start_time", start_time.as_str()),
            ("lang", self.config.language.as_str()),
        ];

        debug!(%url, "Searching routes");
        let body = self.get(&url, &params).await?;
        let result = Self::parse_transit_response(&body)?;

        if result.item_count() == 0 {
            warn!("No routes found");
        }

        debug!(count = result.item_count(), "Routes received");
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn autocomplete(&self, query: &str) -> Result<WireAutocompleteResponse, TransitError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TransitError::InvalidQuery(
                "word must not be empty".to_string(),
            ));
        }

        // Keyed by exactly what is sent upstream
        let cache_key = query.to_string();
        if let Some(cache) = &self.suggestions
            && let Some(cached) = cache.get(&cache_key).await
        {
            debug!(%query, "Autocomplete cache hit");
            return Ok(cached);
        }

        let url = self.endpoint("autocomplete");
        let params = [("word", query), ("lang", self.config.language.as_str())];

        debug!(%url, "Fetching suggestions");
        let body = self.get(&url, &params).await?;
        let result = Self::parse_autocomplete_response(&body)?;

        if let Some(cache) = &self.suggestions {
            cache.insert(cache_key, result.clone()).await;
        }

        Ok(result)
    }

    async fn is_healthy(&self) -> bool {
        let url = self.endpoint("autocomplete");
        let params = [("word", "東京"), ("lang", self.config.language.as_str())];
        self.get(&url, &params).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpTransitClient::new(&TransitConfig::for_testing());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_missing_base_url() {
        let result = HttpTransitClient::new(&TransitConfig::default());
        assert!(matches!(result, Err(TransitError::ConfigurationError(_))));
    }

    #[test]
    fn test_cache_follows_config() {
        let client = HttpTransitClient::new(&TransitConfig::for_testing()).unwrap();
        assert!(client.suggestions.is_none());

        let config = TransitConfig {
            cache_ttl_minutes: 5,
            ..TransitConfig::for_testing()
        };
        let client = HttpTransitClient::new(&config).unwrap();
        assert!(client.suggestions.is_some());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = TransitConfig {
            base_url: "https://api.example.com/v1/".to_string(),
            ..TransitConfig::for_testing()
        };
        let client = HttpTransitClient::new(&config).unwrap();
        assert_eq!(client.endpoint("transit"), "https://api.example.com/v1/transit");
    }

    #[test]
    fn test_start_time_format() {
        let departure = NaiveDateTime::parse_from_str("2025-08-29 20:30:05", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        assert_eq!(
            departure.format(START_TIME_FORMAT).to_string(),
            "2025-08-29T20:30:05"
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = HttpTransitClient::parse_transit_response("not json");
        assert!(matches!(result, Err(TransitError::ParseError(_))));

        let result = HttpTransitClient::parse_autocomplete_response("[1, 2");
        assert!(matches!(result, Err(TransitError::ParseError(_))));
    }

    #[test]
    fn test_parse_empty_response() {
        let result = HttpTransitClient::parse_transit_response(r#"{"items": []}"#).unwrap();
        assert_eq!(result.item_count(), 0);
    }

    #[tokio::test]
    async fn test_search_rejects_blank_endpoints() {
        let client = HttpTransitClient::new(&TransitConfig::for_testing()).unwrap();
        let departure = NaiveDateTime::parse_from_str("2025-08-29 20:30:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();

        let result = client.search("  ", "三越前", departure).await;
        assert!(matches!(result, Err(TransitError::InvalidQuery(_))));

        let result = client.search("押上", "", departure).await;
        assert!(matches!(result, Err(TransitError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_autocomplete_rejects_blank_query() {
        let client = HttpTransitClient::new(&TransitConfig::for_testing()).unwrap();
        let result = client.autocomplete("   ").await;
        assert!(matches!(result, Err(TransitError::InvalidQuery(_))));
    }
}
