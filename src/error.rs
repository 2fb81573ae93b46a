//! Error types for the production_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the production_forecast crate
#[derive(Debug, Error)]
pub enum EngineError {
    /// Series has fewer than two distinct dates, nothing to fit
    #[error("Insufficient data: at least 2 distinct dates are required")]
    InsufficientData,

    /// Model fitting failed on a degenerate series
    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    Data(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    Polars(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, EngineError>;

impl From<PolarsError> for EngineError {
    fn from(err: PolarsError) -> Self {
        EngineError::Polars(err.to_string())
    }
}
