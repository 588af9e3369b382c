//! Application layer - Use cases and orchestration
//!
//! Defines the ports the route search use case needs (routing service,
//! search history) and the service that orchestrates them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
