//! # Emission Forecast
//!
//! Forecasts a yearly emission series (kilotonnes of CO₂) to an arbitrary
//! future year by blending several simple extrapolation methods, each weighted
//! by how well it predicted the most recent held-out years.
//!
//! ## Features
//!
//! - Four extrapolators: damped growth, level-trend smoothing, local slope and
//!   damped quadratic trend
//! - Backtesting on the trailing `clamp(n / 6, 1, 5)` observations
//! - Inverse-RMSE ensemble weights
//! - Tiered impact narrative and a combined chart series
//! - CSV reference datasets with a fallback entity, TOML configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use emission_forecast::{DataLoader, ForecastConfig, ForecastRequest, Forecaster};
//!
//! let dataset = DataLoader::builtin()?;
//! let forecaster = Forecaster::new(dataset, ForecastConfig::default())?;
//!
//! let result = forecaster.forecast(&ForecastRequest::for_entity("China", 2035))?;
//! assert_eq!(result.chart_series.last().map(|e| e.year()), Some(2035));
//! println!("{}", result.narrative.summary);
//! # Ok::<(), emission_forecast::ForecastError>(())
//! ```

pub mod backtest;
pub mod chart;
pub mod config;
pub mod data;
pub mod engine;
pub mod ensemble;
pub mod error;
pub mod models;
pub mod narrative;
pub mod report;

// Re-export commonly used types
pub use crate::backtest::{BacktestScore, Backtester, SENTINEL_SCORE};
pub use crate::chart::{ChartEntry, SeriesAssembler};
pub use crate::config::{ForecastConfig, HorizonBounds, Scope};
pub use crate::data::{DataLoader, HistoricalSeries, ReferenceDataset, SeriesSource, TimePoint};
pub use crate::engine::{
    forecast_series, ForecastRequest, ForecastResult, Forecaster, MAX_FORECAST_STEPS,
};
pub use crate::ensemble::{EnsembleWeights, Ensembler};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{Extrapolator, ForecastVector, Method};
pub use crate::narrative::{ImpactTier, Narrative, NarrativeClassifier};
pub use crate::report::ForecastReport;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
