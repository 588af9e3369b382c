//! Domain entities - Objects with identity and lifecycle

mod history;
mod route;
mod segment;
mod suggestion;

pub use history::{SavedRoute, SearchHistoryEntry, StationHistoryEntry};
pub use route::{FARE_IC_CARD, FARE_REGULAR, Route};
pub use segment::Segment;
pub use suggestion::Suggestion;
