//! Least-squares fits against point index
//!
//! Contains:
//! - Ordinary least squares slope over `x = 0, 1, .., n-1`
//! - Quadratic trend fit via the 3x3 normal equations
//! - A small Gaussian elimination solver with partial pivoting

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Pivots with a smaller magnitude than this mark the system as singular
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Slope of the ordinary least squares line through `(i, values[i])`.
///
/// Returns `0.0` when the x spread is degenerate (fewer than two points).
pub fn index_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    if denominator.abs() < PIVOT_TOLERANCE {
        return 0.0;
    }

    numerator / denominator
}

/// Solve `a * x = b` for a 3x3 system.
///
/// Uses forward elimination with partial pivoting (largest magnitude in each
/// column) followed by back substitution. Fails with
/// [`MathError::SingularSystem`] as soon as a pivot drops below
/// [`PIVOT_TOLERANCE`].
pub fn solve_3x3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Result<[f64; 3]> {
    for col in 0..3 {
        let mut pivot_row = col;
        for row in col + 1..3 {
            if a[row][col].abs() > a[pivot_row][col].abs() {
                pivot_row = row;
            }
        }

        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        let pivot = a[col][col];
        if pivot.abs() < PIVOT_TOLERANCE {
            return Err(MathError::SingularSystem(pivot.abs()));
        }

        for row in col + 1..3 {
            let factor = a[row][col] / pivot;
            for j in col..3 {
                a[row][j] -= factor * a[col][j];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; 3];
    for i in (0..3).rev() {
        let mut acc = b[i];
        for j in i + 1..3 {
            acc -= a[i][j] * x[j];
        }
        x[i] = acc / a[i][i];
    }

    Ok(x)
}

/// Fitted quadratic `y = a*x^2 + b*x + c`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticFit {
    /// Curvature coefficient
    pub a: f64,
    /// Linear coefficient
    pub b: f64,
    /// Intercept
    pub c: f64,
}

impl QuadraticFit {
    /// Least-squares quadratic through `(i, values[i])`
    pub fn by_index(values: &[f64]) -> Result<Self> {
        let n = values.len();
        if n < 3 {
            return Err(MathError::InsufficientData(format!(
                "Quadratic fit needs at least 3 points, have {}",
                n
            )));
        }

        let mut sum_x = 0.0;
        let mut sum_x2 = 0.0;
        let mut sum_x3 = 0.0;
        let mut sum_x4 = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_x2y = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            let x2 = x * x;

            sum_x += x;
            sum_x2 += x2;
            sum_x3 += x2 * x;
            sum_x4 += x2 * x2;
            sum_y += y;
            sum_xy += x * y;
            sum_x2y += x2 * y;
        }

        let normal = [
            [sum_x4, sum_x3, sum_x2],
            [sum_x3, sum_x2, sum_x],
            [sum_x2, sum_x, n as f64],
        ];
        let rhs = [sum_x2y, sum_xy, sum_y];

        let [a, b, c] = solve_3x3(normal, rhs)?;
        Ok(Self { a, b, c })
    }

    /// Evaluate the polynomial at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_slope() {
        assert!((index_slope(&[10.0, 20.0, 30.0]) - 10.0).abs() < 1e-12);
        assert!((index_slope(&[5.0, 5.0, 5.0, 5.0])).abs() < 1e-12);
        assert_eq!(index_slope(&[7.0]), 0.0);
    }

    #[test]
    fn test_solve_identity() {
        let a = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let x = solve_3x3(a, [3.0, -2.0, 5.0]).unwrap();
        assert_eq!(x, [3.0, -2.0, 5.0]);
    }

    #[test]
    fn test_solve_needs_pivoting() {
        // zero on the leading diagonal forces a row swap
        let a = [[0.0, 2.0, 1.0], [1.0, 1.0, 1.0], [2.0, 1.0, 3.0]];
        let x = solve_3x3(a, [7.0, 6.0, 13.0]).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-9);
        assert!((x[1] - 2.0).abs() < 1e-9);
        assert!((x[2] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_singular() {
        let a = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]];
        assert!(matches!(
            solve_3x3(a, [1.0, 2.0, 3.0]),
            Err(MathError::SingularSystem(_))
        ));
    }

    #[test]
    fn test_quadratic_recovers_coefficients() {
        // y = x^2 + 2x + 1
        let fit = QuadraticFit::by_index(&[1.0, 4.0, 9.0, 16.0, 25.0]).unwrap();
        assert!((fit.a - 1.0).abs() < 1e-9);
        assert!((fit.b - 2.0).abs() < 1e-9);
        assert!((fit.c - 1.0).abs() < 1e-9);
        assert!((fit.evaluate(5.0) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_on_line_has_flat_curvature() {
        let fit = QuadraticFit::by_index(&[100.0, 110.0, 120.0, 130.0, 140.0]).unwrap();
        assert!(fit.a.abs() < 1e-9);
        assert!((fit.b - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_needs_three_points() {
        assert!(matches!(
            QuadraticFit::by_index(&[1.0, 2.0]),
            Err(MathError::InsufficientData(_))
        ));
    }
}
