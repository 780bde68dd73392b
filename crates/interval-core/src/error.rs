//! Error types for interval summarization
//!
//! Provides a unified error type for all interval-viz crates.

use thiserror::Error;

/// Core error type for summarization and rendering operations
#[derive(Error, Debug)]
pub enum Error {
    /// Coverage multiplier is negative or non-finite
    #[error("Invalid coverage: k = {k} must be finite and non-negative")]
    InvalidCoverage { k: f64 },

    /// No observations were supplied
    #[error("Empty input: {0} requires at least one observation")]
    EmptyInput(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for an empty observation set
    pub fn empty_input(operation: &str) -> Self {
        Self::EmptyInput(operation.to_string())
    }

    /// Create an error for an invalid coverage multiplier
    pub fn invalid_coverage(k: f64) -> Self {
        Self::InvalidCoverage { k }
    }

    /// Create an error for a probability outside [0, 1]
    pub fn invalid_probability(p: f64) -> Self {
        Self::InvalidParameter(format!("Probability {p} must be in [0, 1]"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }
}
