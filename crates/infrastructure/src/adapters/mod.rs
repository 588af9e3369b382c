//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod transit_adapter;

pub use transit_adapter::TransitAdapter;
