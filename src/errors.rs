//! Error Types
//!
//! Stripping itself never fails: the rule predicates are total over
//! well-formed descriptors, and a missing configuration means the filter is
//! simply not constructed. Errors only arise at the boundary: parsing
//! keyword spellings reported by the shader compiler and decoding build
//! configuration files.

use thiserror::Error;

/// The error type for the stripping engine's boundary operations.
#[derive(Error, Debug)]
pub enum StripError {
    /// A keyword spelling outside the known catalog.
    #[error("Unknown shader keyword: {0}")]
    UnknownKeyword(String),

    /// Build configuration failed to decode.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// File I/O error while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, StripError>`.
pub type Result<T> = std::result::Result<T, StripError>;
