//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the routing API
//! adapter and the in-memory search history. Also owns configuration
//! loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::AppConfig;
pub use persistence::InMemoryHistoryStore;
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
