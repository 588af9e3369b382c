//! Domain layer for the transit route search client
//!
//! Contains the canonical in-memory model handed to presentation and storage:
//! routes made of ordered segments, station suggestions, and the history
//! records kept between searches. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
