//! Error types for the emission_forecast crate

use outlook_math::MathError;
use thiserror::Error;

/// Custom error types for the emission_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to series validation or loading
    #[error("Data error: {0}")]
    DataError(String),

    /// Target year rejected before the engine runs
    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),

    /// Neither the requested entity nor the configured fallback exists
    #[error("Unknown entity '{0}' and no usable fallback entity is configured")]
    UnknownEntity(String),

    /// Every extrapolator was degenerate during backtesting
    #[error("All forecasting methods failed to produce a usable backtest")]
    AllMethodsFailed,

    /// Error from configuration loading or validation
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from numeric kernels
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from JSON or TOML (de)serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}
