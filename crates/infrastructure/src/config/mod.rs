//! Application configuration
//!
//! Sources, in increasing priority:
//! - built-in defaults
//! - `config.toml` in the working directory (optional)
//! - environment variables prefixed `TRANSIT_`, with `__` between nested
//!   keys (e.g. `TRANSIT_TRANSIT__TIMEOUT_SECS=20`, `TRANSIT_LOGGING__FORMAT=json`)
//! - `TRANSIT_API_BASE_URL`, which sets `transit.base_url`

use integration_transit::TransitConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::LoggingConfig;

/// Default configuration file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_FILE: &str = "config";

/// Environment variable carrying the routing API base URL
pub const BASE_URL_ENV: &str = "TRANSIT_API_BASE_URL";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Routing API client settings
    #[serde(default)]
    pub transit: TransitConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE, std::env::var(BASE_URL_ENV).ok())
    }

    /// Load configuration from a specific file, with an optional base URL override
    pub fn load_from(
        file: &str,
        base_url_override: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("transit.timeout_secs", 10)?
            .set_default("transit.language", "ja")?
            .set_default("transit.timezone", "Asia/Tokyo")?
            .set_default("logging.filter", "warn")?
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., TRANSIT_TRANSIT__LANGUAGE)
            .add_source(
                config::Environment::with_prefix("TRANSIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Some(base_url) = base_url_override.filter(|url| !url.trim().is_empty()) {
            builder = builder.set_override("transit.base_url", base_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.transit
            .validate()
            .map_err(|e| format!("transit.{e}"))
    }
}
