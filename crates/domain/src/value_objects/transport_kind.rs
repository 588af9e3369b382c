//! Transport kind classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mode of transport used by a single segment
///
/// A closed set: upstream mode tags that are not recognised fall back to
/// [`TransportKind::Train`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Walking transfer
    Walk,
    /// Local, rapid and express trains
    Train,
    /// Bus
    Bus,
    /// Subway / metro
    Subway,
}

impl TransportKind {
    /// All kinds, in display order
    pub const ALL: [Self; 4] = [Self::Walk, Self::Train, Self::Bus, Self::Subway];

    /// Classify an upstream move tag (case-insensitive)
    ///
    /// Absent and unrecognised tags map to `Train`.
    #[must_use]
    #[allow(clippy::match_same_arms)] // Known train tags listed apart from the fallback
    pub fn from_mode_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::Train;
        };
        match tag.to_lowercase().as_str() {
            "walk" => Self::Walk,
            "local_train" | "rapid_train" | "express_train" => Self::Train,
            "bus" => Self::Bus,
            "subway" => Self::Subway,
            _ => Self::Train,
        }
    }

    /// Stable machine-readable name (matches the serde representation)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Train => "train",
            Self::Bus => "bus",
            Self::Subway => "subway",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Walk => "Walk",
            Self::Train => "Train",
            Self::Bus => "Bus",
            Self::Subway => "Subway",
        }
    }

    /// Emoji representation for compact listings
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Walk => "🚶",
            Self::Train => "🚆",
            Self::Bus => "🚌",
            Self::Subway => "🚇",
        }
    }

    /// Fallback display color when upstream supplies none
    #[must_use]
    pub const fn default_color(&self) -> &'static str {
        match self {
            Self::Walk => "#FF9500",
            Self::Train => "#007AFF",
            Self::Bus => "#34C759",
            Self::Subway => "#AF52DE",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
