//! Error types for RosterDB.

use thiserror::Error;

/// Result type alias using RosterError.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors that can occur in RosterDB operations.
///
/// Lookups never fail: an absent key or an empty heap is reported as
/// `None` or an empty result, not as an error.
#[derive(Debug, Error)]
pub enum RosterError {
    // Index errors
    #[error("Duplicate key: id {id} is already indexed")]
    DuplicateKey { id: i64 },

    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: String, value: String },
}
