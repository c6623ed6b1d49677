//! Out-of-sample scoring of extrapolators on the most recent observations

use crate::models::{Extrapolator, Method};
use serde::Serialize;
use tracing::debug;

/// Score reported for a method that could not be compared against actuals
pub const SENTINEL_SCORE: f64 = 999_999.0;

/// Longest held-out window
const MAX_TEST_STEPS: usize = 5;

/// Length of the held-out window for a series of `n` points: `clamp(n / 6, 1, 5)`
pub fn held_out_steps(n: usize) -> usize {
    (n / 6).clamp(1, MAX_TEST_STEPS)
}

/// Split a series into a training prefix and the held-out trailing window
pub fn train_test_split(values: &[f64]) -> (&[f64], &[f64]) {
    let cut = values.len().saturating_sub(held_out_steps(values.len()));
    values.split_at(cut)
}

/// Backtest error of one method
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BacktestScore {
    /// Method that was scored
    pub method: Method,
    /// Root mean square error over the held-out window, or [`SENTINEL_SCORE`]
    pub rmse: f64,
}

impl BacktestScore {
    /// Score for a method that produced no usable comparison
    pub fn sentinel(method: Method) -> Self {
        Self {
            method,
            rmse: SENTINEL_SCORE,
        }
    }

    /// True when this is the sentinel rather than a measured error
    pub fn is_sentinel(&self) -> bool {
        self.rmse == SENTINEL_SCORE
    }
}

/// Outcome of a backtest run
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestReport {
    /// Number of held-out observations
    pub test_steps: usize,
    /// Training prefix every method was run on
    pub train: Vec<f64>,
    /// Held-out actuals
    pub test: Vec<f64>,
    /// One score per extrapolator, in input order
    pub scores: Vec<BacktestScore>,
}

/// Runs every extrapolator on a truncated prefix and scores it on the rest
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtester;

impl Backtester {
    pub fn new() -> Self {
        Self
    }

    /// Score each extrapolator against the held-out tail of `values`
    pub fn run(&self, extrapolators: &[Box<dyn Extrapolator>], values: &[f64]) -> BacktestReport {
        let test_steps = held_out_steps(values.len());
        let (train, test) = train_test_split(values);

        let scores = extrapolators
            .iter()
            .map(|extrapolator| {
                let score = Self::score(extrapolator.as_ref(), train, test);
                debug!(
                    method = %score.method,
                    rmse = score.rmse,
                    train_len = train.len(),
                    test_len = test.len(),
                    "backtest scored"
                );
                score
            })
            .collect();

        BacktestReport {
            test_steps,
            train: train.to_vec(),
            test: test.to_vec(),
            scores,
        }
    }

    /// Score a single extrapolator; degenerate windows yield the sentinel
    pub fn score(extrapolator: &dyn Extrapolator, train: &[f64], test: &[f64]) -> BacktestScore {
        let method = extrapolator.method();
        if train.is_empty() || test.is_empty() {
            return BacktestScore::sentinel(method);
        }

        let forecast = extrapolator.extrapolate(train, test.len());
        match forecast.root_mean_squared_error(test) {
            Ok(rmse) if rmse.is_finite() => BacktestScore { method, rmse },
            _ => BacktestScore::sentinel(method),
        }
    }
}
