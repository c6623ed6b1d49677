//! Rounded response shape handed to presentation layers

use crate::chart::ChartEntry;
use crate::data::TimePoint;
use crate::engine::ForecastResult;
use crate::error::Result;
use crate::models::Method;
use serde::Serialize;
use std::collections::BTreeMap;

/// Change from the baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChangeSummary {
    /// Whole kilotonnes
    pub absolute: i64,
    /// Percent, one decimal; `None` (JSON `null`) when the baseline is zero
    /// and the prediction is not
    pub percentage: Option<f64>,
}

/// One chart row with whole-kilotonne values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<i64>,
    #[serde(flatten)]
    pub predictions: BTreeMap<Method, i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ensemble: Option<i64>,
}

/// Serializable forecast report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub target_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    pub series_entity: String,
    pub baseline: TimePoint,
    pub predictions: BTreeMap<Method, i64>,
    pub ensemble: i64,
    pub change: ChangeSummary,
    pub summary: String,
    pub chart_data: Vec<ChartRow>,
}

fn kilotonnes(value: f64) -> i64 {
    value.round() as i64
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl From<&ChartEntry> for ChartRow {
    fn from(entry: &ChartEntry) -> Self {
        match entry {
            ChartEntry::Actual { year, value } => ChartRow {
                year: *year,
                actual: Some(kilotonnes(*value)),
                predictions: BTreeMap::new(),
                ensemble: None,
            },
            ChartEntry::Forecast {
                year,
                predictions,
                ensemble,
            } => ChartRow {
                year: *year,
                actual: None,
                predictions: predictions
                    .iter()
                    .map(|(m, v)| (*m, kilotonnes(*v)))
                    .collect(),
                ensemble: Some(kilotonnes(*ensemble)),
            },
        }
    }
}

impl From<&ForecastResult> for ForecastReport {
    fn from(result: &ForecastResult) -> Self {
        Self {
            target_year: result.target_year,
            entity: result.requested_entity.clone(),
            series_entity: result.entity_id.clone(),
            baseline: result.baseline,
            predictions: result
                .per_method_prediction
                .iter()
                .map(|(m, v)| (*m, kilotonnes(*v)))
                .collect(),
            ensemble: kilotonnes(result.ensemble_prediction),
            change: ChangeSummary {
                absolute: kilotonnes(result.absolute_change),
                percentage: Some(result.percentage_change)
                    .filter(|pct| pct.is_finite())
                    .map(one_decimal),
            },
            summary: result.narrative.summary.clone(),
            chart_data: result.chart_series.iter().map(ChartRow::from).collect(),
        }
    }
}

impl ForecastReport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
