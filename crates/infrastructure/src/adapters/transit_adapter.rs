//! Transit adapter - Implements TransitPort using integration_transit

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{RouteQuery, TransitPort};
use async_trait::async_trait;
use chrono_tz::Tz;
use domain::{DomainError, Route, Suggestion};
use integration_transit::{
    HttpTransitClient, TransitClient, TransitConfig, TransitError, map_response, map_suggestions,
};
use tracing::{debug, instrument};

/// Adapter for the routing API
///
/// Departure instants are converted to the API's local timezone before the
/// request; responses are mapped into domain routes and suggestions.
pub struct TransitAdapter {
    client: Arc<dyn TransitClient>,
    timezone: Tz,
}

impl std::fmt::Debug for TransitAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAdapter")
            .field("client", &"<TransitClient>")
            .field("timezone", &self.timezone.name())
            .finish()
    }
}

impl TransitAdapter {
    /// Create an adapter around an existing client
    pub fn new(client: Arc<dyn TransitClient>, timezone: Tz) -> Self {
        Self { client, timezone }
    }

    /// Create an adapter with an HTTP client built from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn from_config(config: &TransitConfig) -> Result<Self, ApplicationError> {
        let timezone = config.tz().map_err(ApplicationError::Configuration)?;
        let client = HttpTransitClient::new(config).map_err(Self::convert_error)?;
        Ok(Self::new(Arc::new(client), timezone))
    }

    /// Convert an integration error to an application error
    fn convert_error(error: TransitError) -> ApplicationError {
        match error {
            TransitError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            TransitError::InvalidQuery(msg) => DomainError::ValidationError(msg).into(),
            TransitError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => {
                ApplicationError::ExternalService(format!("Transit request failed: {other}"))
            },
        }
    }
}

#[async_trait]
impl TransitPort for TransitAdapter {
    #[instrument(skip(self))]
    async fn search_routes(&self, query: &RouteQuery) -> Result<Vec<Route>, ApplicationError> {
        let local_departure = query.departure.with_timezone(&self.timezone).naive_local();

        let response = self
            .client
            .search(&query.from, &query.to, local_departure)
            .await
            .map_err(Self::convert_error)?;

        let routes = map_response(&response);
        debug!(
            items = response.item_count(),
            routes = routes.len(),
            "Transit response mapped"
        );
        Ok(routes)
    }

    #[instrument(skip(self))]
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, ApplicationError> {
        let response = self
            .client
            .autocomplete(query)
            .await
            .map_err(Self::convert_error)?;
        Ok(map_suggestions(&response))
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
