//! Segment entity: one uninterrupted leg of a route

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::value_objects::{SegmentId, TransportKind};

/// A single leg travelled with one mode of transport between two named points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Freshly generated identifier
    pub id: SegmentId,
    /// Mode of transport
    pub kind: TransportKind,
    /// Name of the boarding point
    pub from: String,
    /// Name of the alighting point
    pub to: String,
    /// Departure instant with the upstream UTC offset
    pub departure_time: DateTime<FixedOffset>,
    /// Arrival instant with the upstream UTC offset
    pub arrival_time: DateTime<FixedOffset>,
    /// Elapsed minutes as reported upstream
    pub duration_minutes: u32,
    /// Line name (e.g. "東京メトロ半蔵門線")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    /// Direction or headsign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Base fare for this leg in the smallest currency unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare: Option<u32>,
    /// Walking distance in meters (walking legs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    /// Line color as a hex string (e.g. "#8F76D6")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Segment {
    /// Create a segment with no optional details
    #[must_use]
    pub fn new(
        kind: TransportKind,
        from: impl Into<String>,
        to: impl Into<String>,
        departure_time: DateTime<FixedOffset>,
        arrival_time: DateTime<FixedOffset>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: SegmentId::new(),
            kind,
            from: from.into(),
            to: to.into(),
            departure_time,
            arrival_time,
            duration_minutes,
            line: None,
            direction: None,
            fare: None,
            distance: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: Option<String>) -> Self {
        self.line = line;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Option<String>) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn with_fare(mut self, fare: Option<u32>) -> Self {
        self.fare = fare;
        self
    }

    #[must_use]
    pub const fn with_distance(mut self, distance: Option<u32>) -> Self {
        self.distance = distance;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    /// Color to render this segment with, falling back to the kind's default
    #[must_use]
    pub fn display_color(&self) -> &str {
        self.color
            .as_deref()
            .unwrap_or_else(|| self.kind.default_color())
    }

    /// Value equality ignoring the generated identifier
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.from == other.from
            && self.to == other.to
            && self.departure_time == other.departure_time
            && self.arrival_time == other.arrival_time
            && self.duration_minutes == other.duration_minutes
            && self.line == other.line
            && self.direction == other.direction
            && self.fare == other.fare
            && self.distance == other.distance
            && self.color == other.color
    }

    /// Format this segment as a detailed line
    #[must_use]
    pub fn format_detail(&self) -> String {
        let emoji = self.kind.emoji();
        let dep = self.departure_time.format("%H:%M");
        let arr = self.arrival_time.format("%H:%M");

        if self.kind == TransportKind::Walk {
            let dist = self
                .distance
                .map(|d| format!(" ({d}m)"))
                .unwrap_or_default();
            return format!(
                "{emoji} {dep}–{arr} {} → {} Walk{dist}",
                self.from, self.to
            );
        }

        let line = self.line.as_deref().unwrap_or(self.kind.label());
        let direction = self
            .direction
            .as_deref()
            .filter(|d| Some(*d) != self.line.as_deref())
            .map(|d| format!(" [{d}]"))
            .unwrap_or_default();

        format!(
            "{emoji} {dep}–{arr} {} → {} *{line}*{direction}",
            self.from, self.to
        )
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_detail())
    }
}
