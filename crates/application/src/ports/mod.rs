//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod history_store;
mod transit_port;

#[cfg(test)]
pub use history_store::MockHistoryStorePort;
pub use history_store::HistoryStorePort;
#[cfg(test)]
pub use transit_port::MockTransitPort;
pub use transit_port::{RouteQuery, TransitPort, format_routes, format_routes_detailed};
