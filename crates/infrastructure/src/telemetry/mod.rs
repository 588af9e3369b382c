//! Logging initialization
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` (from `RUST_LOG`
//! when set) and a console formatter, human-readable or JSON.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, init_logging};
