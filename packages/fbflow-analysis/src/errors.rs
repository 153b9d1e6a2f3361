//! Error types for fbflow-analysis
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

/// Main error type for fbflow operations
#[derive(Debug, Error)]
pub enum FbflowError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FbflowError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        FbflowError::Parse(msg.into())
    }

    /// Create an analysis error
    pub fn analysis(msg: impl Into<String>) -> Self {
        FbflowError::Analysis(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        FbflowError::Config(msg.into())
    }
}

/// Result type alias for fbflow operations
pub type Result<T> = std::result::Result<T, FbflowError>;
