//! # Outlook Math
//!
//! Numeric kernels shared by the emission forecasting engine.
//! Nothing in here knows about years, entities or tonnes: every function works
//! on plain `f64` slices indexed from zero.

use thiserror::Error;

pub mod accuracy;
pub mod growth;
pub mod regression;

pub use accuracy::root_mean_squared_error;
pub use growth::mean_relative_growth;
pub use regression::{index_slope, solve_3x3, QuadraticFit};

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Singular system: pivot magnitude {0:e} is below tolerance")]
    SingularSystem(f64),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
