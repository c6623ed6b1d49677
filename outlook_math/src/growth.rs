//! Relative growth statistics

use statrs::statistics::Statistics;

/// Average year-over-year relative growth of a series.
///
/// Pairs whose earlier value is zero carry no relative information and are
/// skipped. Returns `0.0` when no usable pair remains.
pub fn mean_relative_growth(values: &[f64]) -> f64 {
    let rates: Vec<f64> = values
        .windows(2)
        .filter(|pair| pair[0] != 0.0)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect();

    if rates.is_empty() {
        return 0.0;
    }

    rates.iter().mean()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_growth() {
        let values = [100.0, 110.0, 121.0, 133.1];
        assert!((mean_relative_growth(&values) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_growth_is_averaged() {
        // +50% then -50%
        let values = [100.0, 150.0, 75.0];
        assert!(mean_relative_growth(&values).abs() < 1e-12);
    }

    #[test]
    fn test_zero_base_is_skipped() {
        let values = [0.0, 10.0, 20.0];
        assert!((mean_relative_growth(&values) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_input() {
        assert_eq!(mean_relative_growth(&[]), 0.0);
        assert_eq!(mean_relative_growth(&[42.0]), 0.0);
        assert_eq!(mean_relative_growth(&[0.0, 0.0]), 0.0);
    }
}
