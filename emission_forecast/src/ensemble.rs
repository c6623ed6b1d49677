//! Inverse-error weighting and pointwise blending of method forecasts

use crate::backtest::BacktestScore;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastVector, Method};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Keeps a perfect backtest from dividing by zero
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Normalized blend weights, one per method, summing to one
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnsembleWeights {
    weights: BTreeMap<Method, f64>,
}

impl EnsembleWeights {
    /// Derive weights `1 / (rmse + eps)`, normalized.
    ///
    /// Fails with [`ForecastError::AllMethodsFailed`] when there are no scores
    /// or every score is the sentinel, and with [`ForecastError::ConfigError`]
    /// when a method is scored twice.
    pub fn from_scores(scores: &[BacktestScore]) -> Result<Self> {
        if scores.iter().all(BacktestScore::is_sentinel) {
            return Err(ForecastError::AllMethodsFailed);
        }

        if let Some(repeated) = scores
            .iter()
            .enumerate()
            .find(|(i, s)| scores[..*i].iter().any(|earlier| earlier.method == s.method))
            .map(|(_, s)| s.method)
        {
            return Err(ForecastError::ConfigError(format!(
                "Method '{}' has more than one backtest score",
                repeated
            )));
        }

        let raw: Vec<(Method, f64)> = scores
            .iter()
            .map(|s| (s.method, 1.0 / (s.rmse + WEIGHT_EPSILON)))
            .collect();
        let total: f64 = raw.iter().map(|(_, w)| w).sum();

        let weights = raw.into_iter().map(|(m, w)| (m, w / total)).collect();
        debug!(?weights, "ensemble weights");

        Ok(Self { weights })
    }

    /// Weight assigned to `method`
    pub fn weight(&self, method: Method) -> Option<f64> {
        self.weights.get(&method).copied()
    }

    /// Methods and their weights in method order
    pub fn iter(&self) -> impl Iterator<Item = (Method, f64)> + '_ {
        self.weights.iter().map(|(m, w)| (*m, *w))
    }

    /// Sum of all weights (one up to rounding)
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Blends full-horizon method forecasts with backtest-derived weights
#[derive(Debug, Clone, Copy, Default)]
pub struct Ensembler;

impl Ensembler {
    pub fn new() -> Self {
        Self
    }

    /// `ensemble[i] = sum over methods of weight * forecast[i]`
    pub fn blend(
        &self,
        weights: &EnsembleWeights,
        forecasts: &[(Method, ForecastVector)],
    ) -> Result<ForecastVector> {
        let horizons = match forecasts.first() {
            Some((_, f)) => f.horizons(),
            None => {
                return Err(ForecastError::DataError(
                    "No method forecasts to blend".to_string(),
                ))
            }
        };

        let mut blended = vec![0.0; horizons];
        for (method, forecast) in forecasts {
            if forecast.horizons() != horizons {
                return Err(ForecastError::DataError(format!(
                    "{} forecast has {} steps, expected {}",
                    method,
                    forecast.horizons(),
                    horizons
                )));
            }

            let weight = weights.weight(*method).ok_or_else(|| {
                ForecastError::DataError(format!("No ensemble weight for {}", method))
            })?;

            for (acc, value) in blended.iter_mut().zip(forecast.values()) {
                *acc += weight * value;
            }
        }

        ForecastVector::new(blended, horizons)
    }
}
