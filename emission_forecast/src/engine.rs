//! Request resolution and the end-to-end forecasting pipeline
//!
//! The pipeline for one request is:
//! series lookup, backtest on a truncated prefix, inverse-error weights,
//! full-horizon forecasts from the same prefix, blend, narrative, chart.
//! Nothing is cached between requests.

use crate::backtest::{BacktestScore, Backtester};
use crate::chart::{ChartEntry, SeriesAssembler};
use crate::config::{ForecastConfig, Scope};
use crate::data::{HistoricalSeries, SeriesSource, TimePoint};
use crate::ensemble::{EnsembleWeights, Ensembler};
use crate::error::{ForecastError, Result};
use crate::models::{ensure_distinct_methods, Extrapolator, ForecastVector, Method};
use crate::narrative::{percentage_change, Narrative, NarrativeClassifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Upper bound on forecast steps past the last observation
pub const MAX_FORECAST_STEPS: usize = 1_000;

/// What the caller wants forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    /// Entity to forecast; `None` means the global series
    #[serde(default)]
    pub entity_id: Option<String>,
    /// Year the point forecast is made for
    pub target_year: i32,
}

impl ForecastRequest {
    /// Request for the global series
    pub fn global(target_year: i32) -> Self {
        Self {
            entity_id: None,
            target_year,
        }
    }

    /// Request for a named entity
    pub fn for_entity(entity_id: impl Into<String>, target_year: i32) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            target_year,
        }
    }
}

/// Full structured outcome of one forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Year the point forecast is for
    pub target_year: i32,
    /// Entity named in the request, if any
    pub requested_entity: Option<String>,
    /// Entity whose series was actually used
    pub entity_id: String,
    /// Last historical observation
    pub baseline: TimePoint,
    /// Each method's value at the target year
    pub per_method_prediction: BTreeMap<Method, f64>,
    /// Blended value at the target year
    pub ensemble_prediction: f64,
    /// `ensemble_prediction - baseline.value`
    pub absolute_change: f64,
    /// Relative change in percent
    pub percentage_change: f64,
    /// Backtest error per method
    pub scores: Vec<BacktestScore>,
    /// Blend weights derived from the scores
    pub weights: EnsembleWeights,
    /// Impact prose
    pub narrative: Narrative,
    /// History followed by per-year forecasts
    pub chart_series: Vec<ChartEntry>,
}

/// Forecast `series` up to `target_year` with the given extrapolators.
///
/// Requires `target_year` to be after the last observation and at most
/// [`MAX_FORECAST_STEPS`] years past it; product bounds are checked by
/// [`Forecaster`]. Each method may appear only once in `extrapolators`. Scoring and the final forecasts both
/// use the training prefix, so the held-out years never feed the published
/// numbers.
pub fn forecast_series(
    series: &HistoricalSeries,
    target_year: i32,
    extrapolators: &[Box<dyn Extrapolator>],
) -> Result<ForecastResult> {
    ensure_distinct_methods(extrapolators)?;

    let baseline = series.last();
    let steps = target_year
        .checked_sub(baseline.year)
        .filter(|years| *years > 0)
        .map(|years| years as usize)
        .filter(|steps| *steps <= MAX_FORECAST_STEPS)
        .ok_or_else(|| {
            ForecastError::InvalidHorizon(format!(
                "target year {} must be after the last observed year {} and at most {} years past it",
                target_year, baseline.year, MAX_FORECAST_STEPS
            ))
        })?;

    let values = series.values();
    let backtest = Backtester::new().run(extrapolators, &values);
    let weights = EnsembleWeights::from_scores(&backtest.scores)?;

    let forecasts: Vec<(Method, ForecastVector)> = extrapolators
        .iter()
        .map(|e| (e.method(), e.extrapolate(&backtest.train, steps)))
        .collect();

    let ensemble = Ensembler::new().blend(&weights, &forecasts)?;
    let ensemble_prediction = ensemble.last().ok_or_else(|| {
        ForecastError::DataError("Ensemble forecast is empty".to_string())
    })?;

    let per_method_prediction: BTreeMap<Method, f64> = forecasts
        .iter()
        .filter_map(|(method, forecast)| forecast.last().map(|v| (*method, v)))
        .collect();

    let absolute_change = ensemble_prediction - baseline.value;
    let pct = percentage_change(baseline.value, ensemble_prediction);
    let narrative = NarrativeClassifier::new().describe(target_year, ensemble_prediction, baseline);
    let chart_series = SeriesAssembler::new().assemble(series, target_year, &forecasts, &ensemble);

    debug!(
        entity = series.entity_id(),
        test_steps = backtest.test_steps,
        steps,
        "forecast assembled"
    );

    Ok(ForecastResult {
        target_year,
        requested_entity: None,
        entity_id: series.entity_id().to_string(),
        baseline,
        per_method_prediction,
        ensemble_prediction,
        absolute_change,
        percentage_change: pct,
        scores: backtest.scores,
        weights,
        narrative,
        chart_series,
    })
}

/// Resolves requests against an injected series source and runs the engine
#[derive(Debug)]
pub struct Forecaster<S: SeriesSource> {
    source: S,
    config: ForecastConfig,
    extrapolators: Vec<Box<dyn Extrapolator>>,
}

impl<S: SeriesSource> Forecaster<S> {
    /// Create a forecaster using the methods enabled in `config`
    pub fn new(source: S, config: ForecastConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ForecastError::ConfigError(errors.join("; ")));
        }

        let extrapolators = config.methods.iter().map(Method::extrapolator).collect();
        Ok(Self {
            source,
            config,
            extrapolators,
        })
    }

    /// Replace the default extrapolators with custom ones, one per method
    pub fn with_extrapolators(mut self, extrapolators: Vec<Box<dyn Extrapolator>>) -> Result<Self> {
        if extrapolators.is_empty() {
            return Err(ForecastError::ConfigError(
                "At least one extrapolator is required".to_string(),
            ));
        }
        ensure_distinct_methods(&extrapolators)?;
        self.extrapolators = extrapolators;
        Ok(self)
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Series and scope for a requested entity, applying the fallback policy
    pub fn resolve(&self, entity_id: Option<&str>) -> Result<(&HistoricalSeries, Scope)> {
        let Some(requested) = entity_id else {
            let global = &self.config.global_entity;
            return self
                .source
                .lookup(global)
                .map(|series| (series, Scope::Global))
                .ok_or_else(|| ForecastError::UnknownEntity(global.clone()));
        };

        if let Some(series) = self.source.lookup(requested) {
            return Ok((series, Scope::Entity));
        }

        let fallback = self
            .config
            .fallback_entity
            .as_deref()
            .and_then(|id| self.source.lookup(id))
            .ok_or_else(|| ForecastError::UnknownEntity(requested.to_string()))?;

        warn!(
            requested,
            fallback = fallback.entity_id(),
            "unknown entity, using fallback series"
        );
        Ok((fallback, Scope::Entity))
    }

    /// Validate the request and produce a forecast
    pub fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResult> {
        let (series, scope) = self.resolve(request.entity_id.as_deref())?;

        let bounds = self.config.horizon(scope);
        let last_year = series.last().year;
        if !bounds.contains(request.target_year) || request.target_year <= last_year {
            return Err(ForecastError::InvalidHorizon(format!(
                "target year {} must be within {}..={} and after {}",
                request.target_year, bounds.min_target_year, bounds.max_target_year, last_year
            )));
        }

        let mut result = forecast_series(series, request.target_year, &self.extrapolators)?;
        result.requested_entity = request.entity_id.clone();

        info!(
            entity = %result.entity_id,
            target_year = result.target_year,
            prediction = result.ensemble_prediction,
            change_pct = result.percentage_change,
            tier = ?result.narrative.tier,
            "forecast complete"
        );

        Ok(result)
    }
}
