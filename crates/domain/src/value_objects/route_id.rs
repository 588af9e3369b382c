//! Route and segment identifiers

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a mapped route
///
/// Generated fresh for every mapping call; never derived from content, so
/// mapping the same response twice yields distinct identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteId(Uuid);

impl RouteId {
    /// Create a new random route ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a route ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RouteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RouteId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Identifier of a single segment within a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId(Uuid);

impl SegmentId {
    /// Create a new random segment ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SegmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_route_id_is_unique() {
        assert_ne!(RouteId::new(), RouteId::new());
    }

    #[test]
    fn route_id_roundtrips_through_string() {
        let original = RouteId::new();
        let parsed = RouteId::parse(&original.to_string()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(RouteId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn from_uuid_trait() {
        let uuid = Uuid::new_v4();
        let id: RouteId = uuid.into();
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn segment_ids_are_unique() {
        let a = SegmentId::default();
        let b = SegmentId::default();
        assert_ne!(a, b);
        assert_ne!(a.as_uuid(), b.as_uuid());
    }
}
