//! Recent-slope extrapolation with decaying influence

use crate::error::{ForecastError, Result};
use crate::models::{check_unit_interval, repeat_last, Extrapolator, ForecastVector, Method};
use outlook_math::index_slope;

/// Shortest history the slope is estimated from
const MIN_HISTORY: usize = 5;

/// Least-squares slope over the trailing window, added with weight `decay^i`
#[derive(Debug, Clone)]
pub struct LocalSlopeExtrapolator {
    /// Number of trailing points used for the slope
    window: usize,
    /// Per-step decay of the slope contribution
    decay: f64,
}

impl Default for LocalSlopeExtrapolator {
    fn default() -> Self {
        Self {
            window: 10,
            decay: 0.97,
        }
    }
}

impl LocalSlopeExtrapolator {
    /// Create an extrapolator with a custom window (at least 2) and decay in `(0, 1]`
    pub fn new(window: usize, decay: f64) -> Result<Self> {
        if window < 2 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be at least 2".to_string(),
            ));
        }
        check_unit_interval("Decay", decay, true)?;

        Ok(Self { window, decay })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }
}

impl Extrapolator for LocalSlopeExtrapolator {
    fn method(&self) -> Method {
        Method::LocalSlope
    }

    fn extrapolate(&self, history: &[f64], steps: usize) -> ForecastVector {
        let n = history.len();
        if n < MIN_HISTORY {
            return repeat_last(history, steps);
        }

        let window = self.window.min(n);
        let slope = index_slope(&history[n - window..]);

        let mut current = history[n - 1];
        let mut weight = 1.0;
        let mut values = Vec::with_capacity(steps);

        for _ in 0..steps {
            current += slope * weight;
            weight *= self.decay;
            values.push(current.max(0.0));
        }

        ForecastVector::from_values(values)
    }
}
