//! Unified error types for the hydrosite crates
//!
//! [`HydroError`] is the common error at API boundaries. Module-level error
//! types (profile building, configuration) convert into it so callers can use
//! `?` uniformly.
//!
//! # Example
//!
//! ```ignore
//! use hydrosite_core::{HydroError, HydroResult};
//!
//! fn run(path: &str) -> HydroResult<()> {
//!     let streams = read_streams(path)?;
//!     optimize(&streams)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all hydrosite operations.
#[derive(Error, Debug)]
pub enum HydroError {
    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Degenerate or malformed geometry
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using HydroError.
pub type HydroResult<T> = Result<T, HydroError>;

impl From<anyhow::Error> for HydroError {
    fn from(err: anyhow::Error) -> Self {
        HydroError::Other(err.to_string())
    }
}

impl From<String> for HydroError {
    fn from(s: String) -> Self {
        HydroError::Other(s)
    }
}

impl From<&str> for HydroError {
    fn from(s: &str) -> Self {
        HydroError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for HydroError {
    fn from(err: serde_json::Error) -> Self {
        HydroError::Parse(err.to_string())
    }
}
