//! In-memory search history store
//!
//! Keeps recent searches, station usage and saved routes in process memory.
//! Each list is kept in recency order (most recently touched last), so
//! listings are a reverse walk and never depend on timestamp resolution.

use application::error::ApplicationError;
use application::ports::HistoryStorePort;
use async_trait::async_trait;
use domain::{
    Route, RouteId, SavedRoute, SearchHistoryEntry, StationHistoryEntry, StationRole,
    SuggestionKind,
};
use parking_lot::RwLock;
use tracing::debug;

/// Default cap on remembered searches and stations
pub const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Debug, Default)]
struct HistoryState {
    searches: Vec<SearchHistoryEntry>,
    stations: Vec<StationHistoryEntry>,
    saved: Vec<SavedRoute>,
}

/// Thread-safe in-memory implementation of [`HistoryStorePort`]
///
/// Searches and stations beyond `max_entries` are evicted oldest first.
/// Saved routes are never evicted.
#[derive(Debug)]
pub struct InMemoryHistoryStore {
    state: RwLock<HistoryState>,
    max_entries: usize,
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHistoryStore {
    /// Create an empty store with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// Create an empty store keeping at most `max_entries` searches and stations
    #[must_use]
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            state: RwLock::new(HistoryState::default()),
            max_entries: max_entries.max(1),
        }
    }
}

/// Drop the oldest entries beyond `max`
fn evict<T>(entries: &mut Vec<T>, max: usize) {
    if entries.len() > max {
        let excess = entries.len() - max;
        entries.drain(..excess);
    }
}

#[async_trait]
impl HistoryStorePort for InMemoryHistoryStore {
    async fn record_search(
        &self,
        from: &str,
        to: &str,
        kinds: (SuggestionKind, SuggestionKind),
    ) -> Result<SearchHistoryEntry, ApplicationError> {
        let mut state = self.state.write();

        let entry = match state.searches.iter().position(|e| e.matches(from, to)) {
            Some(index) => {
                let mut entry = state.searches.remove(index);
                entry.record_repeat();
                entry
            },
            None => SearchHistoryEntry::new(from, to),
        }
        .with_kinds(kinds.0, kinds.1);

        debug!(%from, %to, count = entry.search_count, "Search recorded");
        state.searches.push(entry.clone());
        evict(&mut state.searches, self.max_entries);
        Ok(entry)
    }

    async fn recent_searches(
        &self,
        limit: usize,
    ) -> Result<Vec<SearchHistoryEntry>, ApplicationError> {
        let state = self.state.read();
        Ok(state.searches.iter().rev().take(limit).cloned().collect())
    }

    async fn record_station(
        &self,
        name: &str,
        role: StationRole,
    ) -> Result<StationHistoryEntry, ApplicationError> {
        let mut state = self.state.write();

        let existing = state
            .stations
            .iter()
            .position(|e| e.station_name == name && e.role == role);
        let entry = match existing {
            Some(index) => {
                let mut entry = state.stations.remove(index);
                entry.record_use();
                entry
            },
            None => StationHistoryEntry::new(name, role),
        };

        state.stations.push(entry.clone());
        evict(&mut state.stations, self.max_entries);
        Ok(entry)
    }

    async fn recent_stations(
        &self,
        role: Option<StationRole>,
        limit: usize,
    ) -> Result<Vec<StationHistoryEntry>, ApplicationError> {
        let state = self.state.read();
        Ok(state
            .stations
            .iter()
            .rev()
            .filter(|e| role.is_none_or(|r| e.role == r))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn save_route(&self, route: &Route) -> Result<SavedRoute, ApplicationError> {
        let mut state = self.state.write();

        if let Some(saved) = state.saved.iter().find(|s| s.route_id() == route.id) {
            return Ok(saved.clone());
        }

        let saved = SavedRoute::from_route(route.clone());
        debug!(name = %saved.name, "Route saved");
        state.saved.push(saved.clone());
        Ok(saved)
    }

    async fn remove_saved_route(&self, route_id: &RouteId) -> Result<bool, ApplicationError> {
        let mut state = self.state.write();
        let before = state.saved.len();
        state.saved.retain(|s| s.route_id() != *route_id);
        Ok(state.saved.len() != before)
    }

    async fn saved_routes(&self) -> Result<Vec<SavedRoute>, ApplicationError> {
        let state = self.state.read();
        Ok(state.saved.iter().rev().cloned().collect())
    }
}
