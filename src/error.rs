//! Error Types
//!
//! Generation is a pure function of (seed, configuration), so the only
//! failures are construction/configuration problems detected before any
//! output exists, plus encoding failures at the export boundary.

use thiserror::Error;

/// Library result alias.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while building or encoding a match.
#[derive(Debug, Error)]
pub enum SimError {
    /// Map name not present in the registry.
    #[error("unknown map: {0}")]
    UnknownMap(String),

    /// A random pick was asked to choose from nothing.
    #[error("cannot choose from an empty {0}")]
    EmptyChoice(&'static str),

    /// Configuration value outside its valid domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Record encoding failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
