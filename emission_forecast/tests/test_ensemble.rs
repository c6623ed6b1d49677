use approx::assert_abs_diff_eq;
use emission_forecast::backtest::BacktestScore;
use emission_forecast::ensemble::{EnsembleWeights, Ensembler};
use emission_forecast::models::{ForecastVector, Method};
use emission_forecast::ForecastError;

fn score(method: Method, rmse: f64) -> BacktestScore {
    BacktestScore { method, rmse }
}

#[test]
fn test_weights_sum_to_one() {
    let cases = [
        vec![
            score(Method::DampedGrowth, 1.0),
            score(Method::LevelTrend, 2.0),
            score(Method::LocalSlope, 4.0),
            score(Method::QuadraticTrend, 8.0),
        ],
        vec![
            score(Method::DampedGrowth, 1.5e6),
            score(Method::LevelTrend, BacktestScore::sentinel(Method::LevelTrend).rmse),
        ],
        vec![score(Method::LocalSlope, 0.0)],
    ];

    for scores in &cases {
        let weights = EnsembleWeights::from_scores(scores).unwrap();
        assert_abs_diff_eq!(weights.total(), 1.0, epsilon = 1e-9);
        assert!(weights.iter().all(|(_, w)| w > 0.0 && w <= 1.0));
    }
}

#[test]
fn test_inverse_error_weighting() {
    let weights = EnsembleWeights::from_scores(&[
        score(Method::DampedGrowth, 1.0),
        score(Method::LevelTrend, 3.0),
    ])
    .unwrap();

    assert_abs_diff_eq!(weights.weight(Method::DampedGrowth).unwrap(), 0.75, epsilon = 1e-9);
    assert_abs_diff_eq!(weights.weight(Method::LevelTrend).unwrap(), 0.25, epsilon = 1e-9);
    assert_eq!(weights.weight(Method::LocalSlope), None);
    assert_eq!(weights.len(), 2);
}

#[test]
fn test_perfect_backtest_dominates() {
    let weights = EnsembleWeights::from_scores(&[
        score(Method::DampedGrowth, 0.0),
        score(Method::LevelTrend, 5000.0),
        score(Method::LocalSlope, 4000.0),
        score(Method::QuadraticTrend, 3000.0),
    ])
    .unwrap();
    assert_abs_diff_eq!(weights.weight(Method::DampedGrowth).unwrap(), 1.0, epsilon = 1e-9);

    let forecasts = vec![
        (Method::DampedGrowth, ForecastVector::new(vec![10.0, 20.0], 2).unwrap()),
        (Method::LevelTrend, ForecastVector::new(vec![900.0, 900.0], 2).unwrap()),
        (Method::LocalSlope, ForecastVector::new(vec![0.0, 0.0], 2).unwrap()),
        (Method::QuadraticTrend, ForecastVector::new(vec![500.0, 5.0], 2).unwrap()),
    ];
    let blended = Ensembler::new().blend(&weights, &forecasts).unwrap();

    assert_abs_diff_eq!(blended.values()[0], 10.0, epsilon = 1e-3);
    assert_abs_diff_eq!(blended.values()[1], 20.0, epsilon = 1e-3);
}

#[test]
fn test_all_sentinel_scores_fail() {
    let scores: Vec<BacktestScore> = Method::ALL.iter().map(|m| BacktestScore::sentinel(*m)).collect();

    assert!(matches!(
        EnsembleWeights::from_scores(&scores),
        Err(ForecastError::AllMethodsFailed)
    ));
    assert!(matches!(
        EnsembleWeights::from_scores(&[]),
        Err(ForecastError::AllMethodsFailed)
    ));
}

#[test]
fn test_large_real_errors_are_not_failures() {
    // errors above the sentinel value are still measurements
    let weights = EnsembleWeights::from_scores(&[
        score(Method::DampedGrowth, 1_148_300.0),
        score(Method::LevelTrend, 1_369_774.0),
    ])
    .unwrap();
    assert_abs_diff_eq!(weights.total(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_blend_is_pointwise_convex_combination() {
    let weights = EnsembleWeights::from_scores(&[
        score(Method::DampedGrowth, 1.0),
        score(Method::LevelTrend, 1.0),
    ])
    .unwrap();

    let forecasts = vec![
        (Method::DampedGrowth, ForecastVector::new(vec![100.0, 200.0, 300.0], 3).unwrap()),
        (Method::LevelTrend, ForecastVector::new(vec![300.0, 200.0, 100.0], 3).unwrap()),
    ];
    let blended = Ensembler::new().blend(&weights, &forecasts).unwrap();

    assert_eq!(blended.horizons(), 3);
    for value in blended.values() {
        assert_abs_diff_eq!(*value, 200.0, epsilon = 1e-9);
    }
}

#[test]
fn test_blend_rejects_mismatched_inputs() {
    let weights = EnsembleWeights::from_scores(&[score(Method::DampedGrowth, 1.0)]).unwrap();

    let unknown = vec![(Method::LocalSlope, ForecastVector::new(vec![1.0], 1).unwrap())];
    assert!(Ensembler::new().blend(&weights, &unknown).is_err());

    let ragged = vec![
        (Method::DampedGrowth, ForecastVector::new(vec![1.0], 1).unwrap()),
        (Method::DampedGrowth, ForecastVector::new(vec![1.0, 2.0], 2).unwrap()),
    ];
    assert!(Ensembler::new().blend(&weights, &ragged).is_err());

    assert!(Ensembler::new().blend(&weights, &[]).is_err());
}

#[test]
fn test_repeated_method_scores_are_rejected() {
    let scores = [
        score(Method::DampedGrowth, 5.009),
        score(Method::DampedGrowth, 6.136),
    ];

    assert!(matches!(
        EnsembleWeights::from_scores(&scores),
        Err(ForecastError::ConfigError(_))
    ));
}
