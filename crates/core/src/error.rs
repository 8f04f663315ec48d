//! Error types for yacluster.

use thiserror::Error;

/// Precondition violations detected while clustering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("invalid threshold {threshold}: must be finite and greater than zero")]
    InvalidThreshold { threshold: f64 },

    #[error("invalid point at position {index}: coordinates ({x}, {y}) must be finite")]
    InvalidPoint { index: usize, x: f64, y: f64 },

    #[error("duplicate identity at positions {first} and {second}")]
    DuplicateId { first: usize, second: usize },
}

/// Convenience Result type alias for ClusterError.
pub type Result<T> = std::result::Result<T, ClusterError>;
