//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod route_id;
mod station_role;
mod suggestion_kind;
mod transport_kind;

pub use geo_location::GeoLocation;
pub use route_id::{RouteId, SegmentId};
pub use station_role::StationRole;
pub use suggestion_kind::SuggestionKind;
pub use transport_kind::TransportKind;
