//! Role a station played in a search

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a station was used as the origin or the destination of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationRole {
    /// Departure side
    Origin,
    /// Arrival side
    Destination,
}

impl fmt::Display for StationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

impl std::str::FromStr for StationRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "origin" | "from" => Ok(Self::Origin),
            "destination" | "to" => Ok(Self::Destination),
            _ => Err(format!("Invalid station role: {s}. Use 'origin' or 'destination'")),
        }
    }
}
