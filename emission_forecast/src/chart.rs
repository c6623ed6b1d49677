//! Combined historical and forecast series for display

use crate::data::HistoricalSeries;
use crate::models::{ForecastVector, Method};
use serde::Serialize;
use std::collections::BTreeMap;

/// One year of the combined chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartEntry {
    /// Observed value
    Actual { year: i32, value: f64 },
    /// Per-method and blended forecast for a future year
    Forecast {
        year: i32,
        predictions: BTreeMap<Method, f64>,
        ensemble: f64,
    },
}

impl ChartEntry {
    pub fn year(&self) -> i32 {
        match self {
            ChartEntry::Actual { year, .. } | ChartEntry::Forecast { year, .. } => *year,
        }
    }

    pub fn is_actual(&self) -> bool {
        matches!(self, ChartEntry::Actual { .. })
    }
}

/// Stitches history and forecasts into one chronological sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesAssembler;

impl SeriesAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Every historical point, then one entry per year after the last
    /// observation up to `target_year`.
    ///
    /// Forecast step `i` belongs to year `last_year + 1 + i`; years past the
    /// end of the ensemble vector are left out.
    pub fn assemble(
        &self,
        history: &HistoricalSeries,
        target_year: i32,
        per_method: &[(Method, ForecastVector)],
        ensemble: &ForecastVector,
    ) -> Vec<ChartEntry> {
        let last_year = history.last().year;
        let future_years = (target_year - last_year).max(0) as usize;

        let mut chart = Vec::with_capacity(history.len() + future_years);
        chart.extend(history.points().iter().map(|p| ChartEntry::Actual {
            year: p.year,
            value: p.value,
        }));

        for step in 0..future_years {
            let Some(blended) = ensemble.value_at(step) else {
                break;
            };

            let predictions = per_method
                .iter()
                .filter_map(|(method, forecast)| forecast.value_at(step).map(|v| (*method, v)))
                .collect();

            chart.push(ChartEntry::Forecast {
                year: last_year + 1 + step as i32,
                predictions,
                ensemble: blended,
            });
        }

        chart
    }
}
