//! Transit service configuration

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the routing API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL of the routing API (no default; usually from `TRANSIT_API_BASE_URL`)
    #[serde(default)]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Response language sent as `lang`
    #[serde(default = "default_language")]
    pub language: String,

    /// IANA timezone the API expects `start_time` in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Autocomplete cache TTL in minutes (0 to disable caching)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "ja".to_string()
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}

const fn default_cache_ttl_minutes() -> u32 {
    5
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
            timezone: default_timezone(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 5,
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }

    /// Parsed [`timezone`](Self::timezone)
    pub fn tz(&self) -> Result<Tz, String> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| format!("unknown timezone: {}", self.timezone))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty (set TRANSIT_API_BASE_URL)".to_string());
        }

        Url::parse(&self.base_url).map_err(|e| format!("base_url is not a valid URL: {e}"))?;

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.language.trim().is_empty() {
            return Err("language must not be empty".to_string());
        }

        self.tz()?;

        Ok(())
    }
}
