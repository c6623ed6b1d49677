//! Extrapolation methods for short yearly series
//!
//! Every method is a stateless function of a numeric history and a step
//! count. Short histories never fail: each method degrades to repeating the
//! last known value (or `0.0` for an empty history).

use crate::error::{ForecastError, Result};
use outlook_math::root_mean_squared_error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Debug};

pub mod damped_growth;
pub mod level_trend;
pub mod local_slope;
pub mod quadratic_trend;

pub use damped_growth::DampedGrowthExtrapolator;
pub use level_trend::LevelTrendSmoother;
pub use local_slope::LocalSlopeExtrapolator;
pub use quadratic_trend::QuadraticTrendFitter;

/// Identity of an extrapolation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Average relative growth with geometric damping
    DampedGrowth,
    /// Forward-chained double exponential smoothing
    LevelTrend,
    /// Recent least-squares slope with decaying influence
    LocalSlope,
    /// Damped quadratic trend over the whole history
    QuadraticTrend,
}

impl Method {
    /// All methods in ensemble order
    pub const ALL: [Method; 4] = [
        Method::DampedGrowth,
        Method::LevelTrend,
        Method::LocalSlope,
        Method::QuadraticTrend,
    ];

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Method::DampedGrowth => "Damped growth",
            Method::LevelTrend => "Level-trend smoothing",
            Method::LocalSlope => "Local slope",
            Method::QuadraticTrend => "Quadratic trend",
        }
    }

    /// Extrapolator with the default constants for this method
    pub fn extrapolator(&self) -> Box<dyn Extrapolator> {
        match self {
            Method::DampedGrowth => Box::new(DampedGrowthExtrapolator::default()),
            Method::LevelTrend => Box::new(LevelTrendSmoother::default()),
            Method::LocalSlope => Box::new(LocalSlopeExtrapolator::default()),
            Method::QuadraticTrend => Box::new(QuadraticTrendFitter::default()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Predicted values, one per future step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastVector {
    /// Forecasted values
    values: Vec<f64>,
    /// Number of periods forecasted
    horizons: usize,
}

impl ForecastVector {
    /// Create a new forecast vector
    pub fn new(values: Vec<f64>, horizons: usize) -> Result<Self> {
        if values.len() != horizons {
            return Err(ForecastError::DataError(format!(
                "Values length ({}) doesn't match horizons ({})",
                values.len(),
                horizons
            )));
        }

        Ok(Self { values, horizons })
    }

    /// `value` repeated for `steps` periods
    pub fn repeat(value: f64, steps: usize) -> Self {
        Self::from_values(vec![value; steps])
    }

    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        let horizons = values.len();
        Self { values, horizons }
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.horizons
    }

    /// Value for zero-based step `step`
    pub fn value_at(&self, step: usize) -> Option<f64> {
        self.values.get(step).copied()
    }

    /// Value at the end of the horizon
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Root mean square error against actual values
    pub fn root_mean_squared_error(&self, actual: &[f64]) -> Result<f64> {
        Ok(root_mean_squared_error(actual, &self.values)?)
    }
}

/// A deterministic extrapolation strategy
pub trait Extrapolator: Debug + Send + Sync {
    /// Which method this is
    fn method(&self) -> Method;

    /// Forecast `steps` values following `history`
    fn extrapolate(&self, history: &[f64], steps: usize) -> ForecastVector;

    /// Name of the method
    fn name(&self) -> &str {
        self.method().label()
    }
}

/// The four default extrapolators in ensemble order
pub fn default_extrapolators() -> Vec<Box<dyn Extrapolator>> {
    Method::ALL.iter().map(Method::extrapolator).collect()
}

/// Fail with a config error when two extrapolators report the same method.
///
/// Weights and per-method predictions are keyed by [`Method`], so a repeat
/// would overwrite one entry and break the blend.
pub fn ensure_distinct_methods(extrapolators: &[Box<dyn Extrapolator>]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for extrapolator in extrapolators {
        if !seen.insert(extrapolator.method()) {
            return Err(ForecastError::ConfigError(format!(
                "Method '{}' is used by more than one extrapolator",
                extrapolator.method()
            )));
        }
    }
    Ok(())
}

/// Degenerate forecast: the last known value, or zero without history
pub(crate) fn repeat_last(history: &[f64], steps: usize) -> ForecastVector {
    ForecastVector::repeat(history.last().copied().unwrap_or(0.0), steps)
}

pub(crate) fn check_unit_interval(name: &str, value: f64, inclusive_one: bool) -> Result<()> {
    let upper_ok = if inclusive_one { value <= 1.0 } else { value < 1.0 };
    if value > 0.0 && upper_ok {
        Ok(())
    } else {
        Err(ForecastError::InvalidParameter(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )))
    }
}
