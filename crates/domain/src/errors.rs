//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Coordinates outside the valid WGS84 range
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

impl DomainError {
    /// Create a validation error for a blank required field
    pub fn blank(field: &str) -> Self {
        Self::ValidationError(format!("{field} must not be empty"))
    }
}
