//! Average-growth extrapolation with geometric damping

use crate::error::Result;
use crate::models::{check_unit_interval, repeat_last, Extrapolator, ForecastVector, Method};
use outlook_math::mean_relative_growth;

/// Applies the historical mean relative growth, damped by `damping^i` at step `i`
#[derive(Debug, Clone)]
pub struct DampedGrowthExtrapolator {
    /// Per-step damping factor
    damping: f64,
}

impl Default for DampedGrowthExtrapolator {
    fn default() -> Self {
        Self { damping: 0.98 }
    }
}

impl DampedGrowthExtrapolator {
    /// Create an extrapolator with a custom damping factor in `(0, 1]`
    pub fn new(damping: f64) -> Result<Self> {
        check_unit_interval("Damping", damping, true)?;
        Ok(Self { damping })
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }
}

impl Extrapolator for DampedGrowthExtrapolator {
    fn method(&self) -> Method {
        Method::DampedGrowth
    }

    fn extrapolate(&self, history: &[f64], steps: usize) -> ForecastVector {
        if history.len() < 2 {
            return repeat_last(history, steps);
        }

        let growth = mean_relative_growth(history);
        let mut current = history[history.len() - 1];
        let mut damping = 1.0;

        let values = (0..steps)
            .map(|_| {
                current *= 1.0 + growth * damping;
                damping *= self.damping;
                current.max(0.0)
            })
            .collect();

        ForecastVector::from_values(values)
    }
}
