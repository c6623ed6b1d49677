//! Level plus trend smoothing chained forward over the horizon

use crate::error::Result;
use crate::models::{check_unit_interval, repeat_last, Extrapolator, ForecastVector, Method};

/// Double exponential smoothing seeded from the last two observations.
///
/// There are no actuals beyond the history, so each step's forecast is fed
/// back as the observation for the next state update.
#[derive(Debug, Clone)]
pub struct LevelTrendSmoother {
    /// Level smoothing weight
    alpha: f64,
    /// Trend smoothing weight
    beta: f64,
}

impl Default for LevelTrendSmoother {
    fn default() -> Self {
        Self {
            alpha: 0.15,
            beta: 0.05,
        }
    }
}

impl LevelTrendSmoother {
    /// Create a smoother with custom weights, both strictly inside `(0, 1)`
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        check_unit_interval("Alpha", alpha, false)?;
        check_unit_interval("Beta", beta, false)?;
        Ok(Self { alpha, beta })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl Extrapolator for LevelTrendSmoother {
    fn method(&self) -> Method {
        Method::LevelTrend
    }

    fn extrapolate(&self, history: &[f64], steps: usize) -> ForecastVector {
        let n = history.len();
        if n < 2 {
            return repeat_last(history, steps);
        }

        let mut level = history[n - 1];
        let mut trend = history[n - 1] - history[n - 2];
        let mut values = Vec::with_capacity(steps);

        for _ in 0..steps {
            let forecast = level + trend;
            values.push(forecast.max(0.0));

            let previous_level = level;
            level = self.alpha * forecast + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - previous_level) + (1.0 - self.beta) * trend;
        }

        ForecastVector::from_values(values)
    }
}
