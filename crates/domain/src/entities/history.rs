//! Search history, station history and saved routes
//!
//! These records are what the persistence collaborator keeps between
//! searches. They carry their own timestamps and counters; storage decides
//! only where they live.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Route;
use crate::value_objects::{RouteId, StationRole, SuggestionKind};

/// One origin/destination pair the user searched for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub from_kind: SuggestionKind,
    pub to_kind: SuggestionKind,
    /// Most recent time this pair was searched
    pub last_searched_at: DateTime<Utc>,
    /// How many times this pair was searched
    pub search_count: u32,
}

impl SearchHistoryEntry {
    /// Create a first-time entry; both endpoints are assumed to be stations
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            from: from.into(),
            to: to.into(),
            from_kind: SuggestionKind::Station,
            to_kind: SuggestionKind::Station,
            last_searched_at: Utc::now(),
            search_count: 1,
        }
    }

    /// Set what each endpoint refers to
    #[must_use]
    pub const fn with_kinds(mut self, from_kind: SuggestionKind, to_kind: SuggestionKind) -> Self {
        self.from_kind = from_kind;
        self.to_kind = to_kind;
        self
    }

    /// Whether this entry is for the given pair
    #[must_use]
    pub fn matches(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }

    /// Record another search of the same pair
    pub fn record_repeat(&mut self) {
        self.search_count = self.search_count.saturating_add(1);
        self.last_searched_at = Utc::now();
    }
}

/// A station the user picked as origin or destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationHistoryEntry {
    pub id: Uuid,
    pub station_name: String,
    pub role: StationRole,
    pub last_used_at: DateTime<Utc>,
    pub usage_count: u32,
}

impl StationHistoryEntry {
    #[must_use]
    pub fn new(station_name: impl Into<String>, role: StationRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            station_name: station_name.into(),
            role,
            last_used_at: Utc::now(),
            usage_count: 1,
        }
    }

    /// Record another use of this station in the same role
    pub fn record_use(&mut self) {
        self.usage_count = self.usage_count.saturating_add(1);
        self.last_used_at = Utc::now();
    }
}

/// A bookmarked route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoute {
    pub id: Uuid,
    /// User-facing name, e.g. "押上 → 三越前"
    pub name: String,
    pub route: Route,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl SavedRoute {
    /// Save a route under a name derived from its endpoints
    #[must_use]
    pub fn from_route(route: Route) -> Self {
        let name = format!("{} → {}", route.from, route.to);
        Self::named(name, route)
    }

    #[must_use]
    pub fn named(name: impl Into<String>, route: Route) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            route,
            created_at: Utc::now(),
            active: true,
        }
    }

    #[must_use]
    pub const fn route_id(&self) -> RouteId {
        self.route.id
    }
}
