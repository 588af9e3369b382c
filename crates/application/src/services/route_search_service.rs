//! Route search service
//!
//! Orchestrates a route search: validates the endpoints, records the search
//! in history and asks the transit port for routes. Also exposes
//! autocomplete, history listings and favorite handling.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{
    DomainError, Route, SavedRoute, SearchHistoryEntry, StationHistoryEntry, StationRole,
    Suggestion, SuggestionKind,
};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{HistoryStorePort, RouteQuery, TransitPort};

/// Application service for route search
pub struct RouteSearchService {
    transit: Arc<dyn TransitPort>,
    history: Arc<dyn HistoryStorePort>,
}

impl fmt::Debug for RouteSearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSearchService")
            .field("transit", &"<TransitPort>")
            .field("history", &"<HistoryStorePort>")
            .finish()
    }
}

impl RouteSearchService {
    /// Create a new route search service
    pub fn new(transit: Arc<dyn TransitPort>, history: Arc<dyn HistoryStorePort>) -> Self {
        Self { transit, history }
    }

    /// Search routes between two place names
    ///
    /// Both names are recorded in history as stations. `departure` defaults
    /// to now. An empty list means the service found no routes; an error
    /// means the search failed.
    pub async fn search_routes(
        &self,
        from: &str,
        to: &str,
        departure: Option<DateTime<Utc>>,
    ) -> Result<Vec<Route>, ApplicationError> {
        let kinds = (SuggestionKind::Station, SuggestionKind::Station);
        self.search(from, to, kinds, departure).await
    }

    /// Search routes between two picked suggestions
    ///
    /// Same as [`search_routes`](Self::search_routes), but history keeps
    /// what each endpoint refers to.
    pub async fn search_between(
        &self,
        from: &Suggestion,
        to: &Suggestion,
        departure: Option<DateTime<Utc>>,
    ) -> Result<Vec<Route>, ApplicationError> {
        self.search(&from.name, &to.name, (from.kind, to.kind), departure)
            .await
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        from: &str,
        to: &str,
        kinds: (SuggestionKind, SuggestionKind),
        departure: Option<DateTime<Utc>>,
    ) -> Result<Vec<Route>, ApplicationError> {
        let from = from.trim();
        let to = to.trim();
        if from.is_empty() {
            return Err(DomainError::blank("from").into());
        }
        if to.is_empty() {
            return Err(DomainError::blank("to").into());
        }

        self.record_history(from, to, kinds).await;

        let query = RouteQuery::new(from, to).with_departure(departure.unwrap_or_else(Utc::now));
        let routes = self.transit.search_routes(&query).await?;

        if routes.is_empty() {
            info!(%from, %to, "No routes found");
        } else {
            info!(%from, %to, count = routes.len(), "Routes found");
        }
        Ok(routes)
    }

    /// History is best effort; a failing store never blocks a search
    async fn record_history(&self, from: &str, to: &str, kinds: (SuggestionKind, SuggestionKind)) {
        if let Err(e) = self.history.record_search(from, to, kinds).await {
            warn!(error = %e, "Failed to record search");
        }
        for (name, role) in [(from, StationRole::Origin), (to, StationRole::Destination)] {
            if let Err(e) = self.history.record_station(name, role).await {
                warn!(error = %e, %role, "Failed to record station");
            }
        }
    }

    /// Suggest places for a partial name
    ///
    /// A blank query yields no suggestions without calling the service.
    #[instrument(skip(self))]
    pub async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, ApplicationError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let suggestions = self.transit.suggest(query).await?;
        debug!(count = suggestions.len(), "Suggestions received");
        Ok(suggestions)
    }

    /// Most recent searches, newest first
    pub async fn recent_searches(
        &self,
        limit: usize,
    ) -> Result<Vec<SearchHistoryEntry>, ApplicationError> {
        self.history.recent_searches(limit).await
    }

    /// Most recently used stations, newest first
    pub async fn recent_stations(
        &self,
        role: Option<StationRole>,
        limit: usize,
    ) -> Result<Vec<StationHistoryEntry>, ApplicationError> {
        self.history.recent_stations(role, limit).await
    }

    /// All saved routes
    pub async fn saved_routes(&self) -> Result<Vec<SavedRoute>, ApplicationError> {
        self.history.saved_routes().await
    }

    /// Flip a route's favorite flag and save or unsave it accordingly
    ///
    /// Returns the new flag. If the store fails the flag is restored.
    #[instrument(skip(self, route), fields(route_id = %route.id))]
    pub async fn toggle_favorite(&self, route: &mut Route) -> Result<bool, ApplicationError> {
        let favorite = route.toggle_favorite();

        let result = if favorite {
            self.history.save_route(route).await.map(|_| ())
        } else {
            self.history.remove_saved_route(&route.id).await.map(|_| ())
        };

        if let Err(e) = result {
            route.set_favorite(!favorite);
            return Err(e);
        }

        debug!(favorite, "Favorite toggled");
        Ok(favorite)
    }

    /// Check if the transit service is available
    pub async fn is_available(&self) -> bool {
        self.transit.is_available().await
    }
}
