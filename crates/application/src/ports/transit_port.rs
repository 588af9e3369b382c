//! Public transit service port
//!
//! Defines the interface for route search and place autocomplete.
//! Adapters in the infrastructure layer implement this port over a routing API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Route, Suggestion};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Options for a route search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    /// Origin place name
    pub from: String,
    /// Destination place name
    pub to: String,
    /// Earliest departure
    pub departure: DateTime<Utc>,
}

impl RouteQuery {
    /// Create a query departing now
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            departure: Utc::now(),
        }
    }

    /// Set departure time
    #[must_use]
    pub const fn with_departure(mut self, departure: DateTime<Utc>) -> Self {
        self.departure = departure;
        self
    }
}

/// Port for public transit operations
///
/// `Ok(vec![])` means the service answered and found nothing; `Err` means
/// the search itself failed.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitPort: Send + Sync {
    /// Search for routes between two named places
    async fn search_routes(&self, query: &RouteQuery) -> Result<Vec<Route>, ApplicationError>;

    /// Suggest places matching a partial name
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, ApplicationError>;

    /// Check if the transit service is available
    async fn is_available(&self) -> bool;
}

/// Format a list of routes as a compact multi-line string
#[must_use]
pub fn format_routes(routes: &[Route]) -> String {
    if routes.is_empty() {
        return String::from("No routes found");
    }

    routes
        .iter()
        .map(Route::format_summary)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format routes with one detail line per segment
#[must_use]
pub fn format_routes_detailed(routes: &[Route]) -> String {
    if routes.is_empty() {
        return String::from("No routes found");
    }

    routes
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let header = format!("Option {}: {}", i + 1, route.format_summary());
            let segments: Vec<String> = route
                .segments
                .iter()
                .map(|s| format!("  {}", s.format_detail()))
                .collect();
            if segments.is_empty() {
                header
            } else {
                format!("{header}\n{}", segments.join("\n"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
