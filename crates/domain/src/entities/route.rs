//! Route entity: one complete point-to-point trip option

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::Segment;
use crate::value_objects::{GeoLocation, RouteId, TransportKind};

/// Fare-map key for the base (cash/ticket) fare
pub const FARE_REGULAR: &str = "regular";

/// Fare-map key for the IC-card fare
pub const FARE_IC_CARD: &str = "ic_card";

/// A trip option from origin to destination, made of ordered segments
///
/// Routes are built fresh for every search response. Apart from the
/// `favorite` flag they are never mutated after mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Freshly generated identifier
    pub id: RouteId,
    /// Origin name
    pub from: String,
    /// Destination name
    pub to: String,
    /// Departure instant with the upstream UTC offset
    pub departure_time: DateTime<FixedOffset>,
    /// Arrival instant with the upstream UTC offset
    pub arrival_time: DateTime<FixedOffset>,
    /// Total travel time in minutes as reported upstream
    pub total_minutes: u32,
    /// Base fare in the smallest currency unit
    pub total_fare: u32,
    /// Number of transfers as reported upstream (never derived from segments)
    pub transfer_count: u32,
    /// Ordered legs; may be empty when leg detail was unrecoverable
    pub segments: Vec<Segment>,
    /// Whether the user bookmarked this route
    pub favorite: bool,
    /// When the search producing this route was mapped
    pub searched_at: DateTime<Utc>,
    /// Upstream rank/label ("1", "2", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    /// Total distance in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<u32>,
    /// Fare per category (regular, ic_card and any upstream tier keys)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fares: BTreeMap<String, u32>,
    /// Origin coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<GeoLocation>,
    /// Destination coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<GeoLocation>,
}

impl Route {
    /// Create a route from its summary values, with no segments
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        departure_time: DateTime<FixedOffset>,
        arrival_time: DateTime<FixedOffset>,
        total_minutes: u32,
        total_fare: u32,
        transfer_count: u32,
    ) -> Self {
        Self {
            id: RouteId::new(),
            from: from.into(),
            to: to.into(),
            departure_time,
            arrival_time,
            total_minutes,
            total_fare,
            transfer_count,
            segments: Vec::new(),
            favorite: false,
            searched_at: Utc::now(),
            rank: None,
            total_distance: None,
            fares: BTreeMap::new(),
            origin: None,
            destination: None,
        }
    }

    #[must_use]
    pub fn with_segments(mut self, segments: Vec<Segment>) -> Self {
        self.segments = segments;
        self
    }

    #[must_use]
    pub const fn with_searched_at(mut self, searched_at: DateTime<Utc>) -> Self {
        self.searched_at = searched_at;
        self
    }

    #[must_use]
    pub fn with_rank(mut self, rank: Option<String>) -> Self {
        self.rank = rank;
        self
    }

    #[must_use]
    pub const fn with_total_distance(mut self, distance: Option<u32>) -> Self {
        self.total_distance = distance;
        self
    }

    #[must_use]
    pub fn with_fares(mut self, fares: BTreeMap<String, u32>) -> Self {
        self.fares = fares;
        self
    }

    #[must_use]
    pub const fn with_endpoints(
        mut self,
        origin: Option<GeoLocation>,
        destination: Option<GeoLocation>,
    ) -> Self {
        self.origin = origin;
        self.destination = destination;
        self
    }

    /// Flip the favorite flag, returning the new value
    pub fn toggle_favorite(&mut self) -> bool {
        self.favorite = !self.favorite;
        self.favorite
    }

    pub fn set_favorite(&mut self, favorite: bool) {
        self.favorite = favorite;
    }

    /// IC-card fare, when upstream reported one
    #[must_use]
    pub fn ic_card_fare(&self) -> Option<u32> {
        self.fares.get(FARE_IC_CARD).copied()
    }

    /// Whether the first and last segments start and end at the route endpoints
    ///
    /// Vacuously true for routes without segments.
    #[must_use]
    pub fn endpoints_match_segments(&self) -> bool {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => first.from == self.from && last.to == self.to,
            _ => true,
        }
    }

    /// Value equality ignoring generated identifiers and the search timestamp
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.departure_time == other.departure_time
            && self.arrival_time == other.arrival_time
            && self.total_minutes == other.total_minutes
            && self.total_fare == other.total_fare
            && self.transfer_count == other.transfer_count
            && self.favorite == other.favorite
            && self.rank == other.rank
            && self.total_distance == other.total_distance
            && self.fares == other.fares
            && self.origin == other.origin
            && self.destination == other.destination
            && self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.is_equivalent(b))
    }

    /// Duration as "1h 05min" or "12min"
    #[must_use]
    pub fn duration_text(&self) -> String {
        let hours = self.total_minutes / 60;
        let minutes = self.total_minutes % 60;
        if hours > 0 {
            format!("{hours}h {minutes:02}min")
        } else {
            format!("{minutes}min")
        }
    }

    /// Fare as "¥1,240"
    #[must_use]
    pub fn fare_text(&self) -> String {
        format!("¥{}", group_thousands(self.total_fare))
    }

    /// "direct" or "N transfer(s)"
    #[must_use]
    pub fn transfer_text(&self) -> String {
        match self.transfer_count {
            0 => String::from("direct"),
            1 => String::from("1 transfer"),
            n => format!("{n} transfers"),
        }
    }

    /// Format as a compact one-line summary
    #[must_use]
    pub fn format_summary(&self) -> String {
        let dep = self.departure_time.format("%H:%M");
        let arr = self.arrival_time.format("%H:%M");

        let lines: Vec<&str> = self
            .segments
            .iter()
            .filter(|s| s.kind != TransportKind::Walk)
            .filter_map(|s| s.line.as_deref())
            .collect();
        let via = if lines.is_empty() {
            String::new()
        } else {
            format!(" {}", lines.join(" → "))
        };

        format!(
            "{dep} → {arr} ({}, {}, {}){via}",
            self.duration_text(),
            self.fare_text(),
            self.transfer_text()
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
