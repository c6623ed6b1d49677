//! Quadratic trend fit pulled back toward the last observation

use crate::error::Result;
use crate::models::{check_unit_interval, repeat_last, Extrapolator, ForecastVector, Method};
use outlook_math::QuadraticFit;
use tracing::trace;

/// Curvature below this share of the data scale counts as no curvature
const CURVATURE_TOLERANCE: f64 = 1e-9;

/// Least-squares quadratic over the whole history.
///
/// The raw polynomial value at step `i` is blended toward the last observation
/// as `last + (poly - last) * decay^i`. A singular or curvature-free fit falls
/// back to the straight line from the first to the last point.
#[derive(Debug, Clone)]
pub struct QuadraticTrendFitter {
    /// Per-step pull toward the last observation
    decay: f64,
}

impl Default for QuadraticTrendFitter {
    fn default() -> Self {
        Self { decay: 0.995 }
    }
}

impl QuadraticTrendFitter {
    /// Create a fitter with a custom decay in `(0, 1]`
    pub fn new(decay: f64) -> Result<Self> {
        check_unit_interval("Decay", decay, true)?;
        Ok(Self { decay })
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Straight-line continuation from the first to the last point
    pub fn linear_fallback(history: &[f64], steps: usize) -> ForecastVector {
        let n = history.len();
        if n < 2 {
            return repeat_last(history, steps);
        }

        let last = history[n - 1];
        let slope = (last - history[0]) / (n - 1) as f64;

        let values = (0..steps)
            .map(|i| (last + slope * (i + 1) as f64).max(0.0))
            .collect();

        ForecastVector::from_values(values)
    }
}

impl Extrapolator for QuadraticTrendFitter {
    fn method(&self) -> Method {
        Method::QuadraticTrend
    }

    fn extrapolate(&self, history: &[f64], steps: usize) -> ForecastVector {
        let fit = match QuadraticFit::by_index(history) {
            Ok(fit) => fit,
            Err(err) => {
                trace!(error = %err, "quadratic fit unavailable, using linear fallback");
                return Self::linear_fallback(history, steps);
            }
        };

        let scale = history.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
        if fit.a.abs() <= CURVATURE_TOLERANCE * scale {
            trace!(curvature = fit.a, "negligible curvature, using linear fallback");
            return Self::linear_fallback(history, steps);
        }

        let n = history.len();
        let last = history[n - 1];
        let mut weight = 1.0;
        let mut values = Vec::with_capacity(steps);

        for i in 0..steps {
            let poly = fit.evaluate((n + i) as f64);
            values.push((last + (poly - last) * weight).max(0.0));
            weight *= self.decay;
        }

        ForecastVector::from_values(values)
    }
}
