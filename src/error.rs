//! Error types for tile topology generation

use std::fmt;

/// Errors that can occur during topology generation or queries
#[derive(Debug, Clone)]
pub enum TopologyError {
    /// Configuration or precondition validation failed
    InvalidConfig(String),
    /// Mesh adjacency was found corrupted mid-generation; the whole grid is
    /// invalid and generation is aborted (a caller may retry with a new seed)
    InvariantViolation(String),
    /// Requested tile ID does not exist
    TileNotFound(usize),
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            TopologyError::InvariantViolation(msg) => {
                write!(f, "mesh invariant violation: {}", msg)
            }
            TopologyError::TileNotFound(id) => write!(f, "tile not found: {}", id),
        }
    }
}

impl std::error::Error for TopologyError {}

/// Result type alias for topology operations
pub type Result<T> = std::result::Result<T, TopologyError>;
