//! Search history port
//!
//! Persistence for recent searches, recently used stations and saved
//! (favorite) routes.

use async_trait::async_trait;
use domain::{
    Route, RouteId, SavedRoute, SearchHistoryEntry, StationHistoryEntry, StationRole,
    SuggestionKind,
};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for search history and saved routes
///
/// Listings are ordered newest first.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoryStorePort: Send + Sync {
    /// Record a search, bumping the counter if the pair was searched before
    ///
    /// `kinds` is what the origin and destination refer to; a repeat
    /// overwrites the kinds stored for the pair.
    async fn record_search(
        &self,
        from: &str,
        to: &str,
        kinds: (SuggestionKind, SuggestionKind),
    ) -> Result<SearchHistoryEntry, ApplicationError>;

    /// Most recent searches
    async fn recent_searches(
        &self,
        limit: usize,
    ) -> Result<Vec<SearchHistoryEntry>, ApplicationError>;

    /// Record a station use, bumping the counter if seen before in that role
    async fn record_station(
        &self,
        name: &str,
        role: StationRole,
    ) -> Result<StationHistoryEntry, ApplicationError>;

    /// Most recently used stations, optionally restricted to one role
    async fn recent_stations(
        &self,
        role: Option<StationRole>,
        limit: usize,
    ) -> Result<Vec<StationHistoryEntry>, ApplicationError>;

    /// Save a route as a favorite
    async fn save_route(&self, route: &Route) -> Result<SavedRoute, ApplicationError>;

    /// Remove a saved route
    ///
    /// Returns true if the route was saved, false if it wasn't.
    async fn remove_saved_route(&self, route_id: &RouteId) -> Result<bool, ApplicationError>;

    /// All saved routes
    async fn saved_routes(&self) -> Result<Vec<SavedRoute>, ApplicationError>;
}
