//! Suggestion kind classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// What an autocomplete suggestion refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Railway, subway or bus station
    #[default]
    Station,
    /// Named facility or point of interest
    Landmark,
    /// Street address
    Address,
}

impl SuggestionKind {
    /// Classify an upstream type tag by case-insensitive exact match
    ///
    /// Absent and unrecognised tags map to `Station`.
    #[must_use]
    pub fn from_type_tag(tag: Option<&str>) -> Self {
        match tag.map(str::to_lowercase).as_deref() {
            Some("landmark") => Self::Landmark,
            Some("address") => Self::Address,
            _ => Self::Station,
        }
    }

    /// Stable machine-readable name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Station => "station",
            Self::Landmark => "landmark",
            Self::Address => "address",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Station => "Station",
            Self::Landmark => "Landmark",
            Self::Address => "Address",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
