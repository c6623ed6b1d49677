//! Forecast accuracy measures

use crate::{MathError, Result};

/// Root mean square error between actual and predicted values
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(MathError::InvalidInput(format!(
            "Actual length ({}) doesn't match predicted length ({})",
            actual.len(),
            predicted.len()
        )));
    }

    if actual.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot score an empty comparison window".to_string(),
        ));
    }

    let mse = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64;

    Ok(mse.sqrt())
}
