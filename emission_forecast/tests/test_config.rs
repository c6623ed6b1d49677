use emission_forecast::config::{ForecastConfig, HorizonBounds, Scope};
use emission_forecast::models::Method;
use emission_forecast::ForecastError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = ForecastConfig::default();

    assert_eq!(config.global_entity, "global");
    assert_eq!(config.fallback_entity.as_deref(), Some("India"));
    assert_eq!(config.horizon(Scope::Global), HorizonBounds::new(2020, 2125));
    assert_eq!(config.horizon(Scope::Entity), HorizonBounds::new(2020, 2150));
    assert_eq!(config.methods, Method::ALL.to_vec());
    assert!(config.validate().is_empty());
}

#[test]
fn test_horizon_bounds_are_inclusive() {
    let bounds = HorizonBounds::new(2020, 2125);
    assert!(bounds.contains(2020));
    assert!(bounds.contains(2125));
    assert!(!bounds.contains(2019));
    assert!(!bounds.contains(2126));
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = ForecastConfig::from_toml_str(
        r#"
        fallback_entity = "China"
        methods = ["damped_growth", "level_trend", "local_slope"]

        [global_horizon]
        min_target_year = 2025
        max_target_year = 2100
        "#,
    )
    .unwrap();

    assert_eq!(config.fallback_entity.as_deref(), Some("China"));
    assert_eq!(
        config.methods,
        vec![Method::DampedGrowth, Method::LevelTrend, Method::LocalSlope]
    );
    assert_eq!(config.global_horizon, HorizonBounds::new(2025, 2100));
    assert_eq!(config.entity_horizon, HorizonBounds::new(2020, 2150));
    assert_eq!(config.global_entity, "global");
}

#[test]
fn test_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "global_entity = \"World\"").unwrap();

    let config = ForecastConfig::from_toml_file(file.path()).unwrap();
    assert_eq!(config.global_entity, "World");

    assert!(matches!(
        ForecastConfig::from_toml_file("/nonexistent/forecast.toml"),
        Err(ForecastError::IoError(_))
    ));
}

#[test]
fn test_from_json_str() {
    let config = ForecastConfig::from_json_str(r#"{"methods": ["quadratic_trend"]}"#).unwrap();
    assert_eq!(config.methods, vec![Method::QuadraticTrend]);

    assert!(matches!(
        ForecastConfig::from_json_str(r#"{"methods": ["holt"]}"#),
        Err(ForecastError::ConfigError(_))
    ));
}

#[test]
fn test_unknown_method_in_toml() {
    assert!(matches!(
        ForecastConfig::from_toml_str("methods = [\"arima\"]"),
        Err(ForecastError::ConfigError(_))
    ));
}

#[test]
fn test_validate_reports_every_problem() {
    let config = ForecastConfig {
        global_entity: " ".to_string(),
        fallback_entity: Some(String::new()),
        global_horizon: HorizonBounds::new(2100, 2020),
        entity_horizon: HorizonBounds::new(2020, 2150),
        methods: vec![Method::LocalSlope, Method::LocalSlope],
    };

    let errors = config.validate();
    assert_eq!(errors.len(), 4);
    assert!(errors.iter().any(|e| e.contains("global_horizon")));
    assert!(errors.iter().any(|e| e.contains("repeat")));

    let no_methods = ForecastConfig {
        methods: vec![],
        ..ForecastConfig::default()
    };
    assert_eq!(no_methods.validate().len(), 1);
}
