//! Historical emission series and the reference dataset they are looked up in

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reference data shipped with the crate (`entity,year,value`, kilotonnes)
const BUILTIN_CSV: &str = include_str!("../data/emissions.csv");

/// One yearly observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Calendar year
    pub year: i32,
    /// Observed value, never negative
    pub value: f64,
}

impl TimePoint {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// Ordered yearly series for one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    /// Entity the series belongs to (a country name or "global")
    entity_id: String,
    /// Points with strictly increasing years
    points: Vec<TimePoint>,
}

impl HistoricalSeries {
    /// Create a validated series.
    ///
    /// Requires at least one point, finite non-negative values and strictly
    /// increasing years. Gaps between years are allowed.
    pub fn new(entity_id: impl Into<String>, points: Vec<TimePoint>) -> Result<Self> {
        let entity_id = entity_id.into();

        if points.is_empty() {
            return Err(ForecastError::DataError(format!(
                "Series '{}' has no observations",
                entity_id
            )));
        }

        if let Some(bad) = points.iter().find(|p| !p.value.is_finite() || p.value < 0.0) {
            return Err(ForecastError::DataError(format!(
                "Series '{}' has an invalid value {} in {}",
                entity_id, bad.value, bad.year
            )));
        }

        if let Some(pair) = points.windows(2).find(|pair| pair[1].year <= pair[0].year) {
            return Err(ForecastError::DataError(format!(
                "Series '{}' years must be strictly increasing ({} follows {})",
                entity_id, pair[1].year, pair[0].year
            )));
        }

        Ok(Self { entity_id, points })
    }

    /// Create a series from `(year, value)` pairs
    pub fn from_pairs(entity_id: impl Into<String>, pairs: &[(i32, f64)]) -> Result<Self> {
        let points = pairs
            .iter()
            .map(|&(year, value)| TimePoint::new(year, value))
            .collect();
        Self::new(entity_id, points)
    }

    /// Entity identifier
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// All observations in chronological order
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    /// Observed values in chronological order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Most recent observation
    pub fn last(&self) -> TimePoint {
        // non-empty by construction
        self.points[self.points.len() - 1]
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Read-only lookup of historical series by entity identifier
pub trait SeriesSource: Send + Sync {
    /// Series for `entity_id`, if the source knows it
    fn lookup(&self, entity_id: &str) -> Option<&HistoricalSeries>;

    /// Known entity identifiers, sorted
    fn entities(&self) -> Vec<&str>;
}

/// In-memory table of series keyed by entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceDataset {
    series: BTreeMap<String, HistoricalSeries>,
}

impl ReferenceDataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from already validated series
    pub fn from_series(series: impl IntoIterator<Item = HistoricalSeries>) -> Self {
        let mut dataset = Self::new();
        for s in series {
            dataset.insert(s);
        }
        dataset
    }

    /// Add or replace the series for its entity
    pub fn insert(&mut self, series: HistoricalSeries) {
        self.series.insert(series.entity_id.clone(), series);
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True when no entity is loaded
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl SeriesSource for ReferenceDataset {
    fn lookup(&self, entity_id: &str) -> Option<&HistoricalSeries> {
        self.series.get(entity_id)
    }

    fn entities(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }
}

/// Row of a long-format emissions CSV
#[derive(Debug, Deserialize)]
struct EmissionRecord {
    entity: String,
    year: i32,
    value: f64,
}

/// Loader for reference datasets
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a dataset from a CSV file with an `entity,year,value` header
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<ReferenceDataset> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a dataset from any CSV reader.
    ///
    /// Rows of one entity may appear in any order; they are sorted by year
    /// before the series is validated, so duplicate years are still rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<ReferenceDataset> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut grouped: BTreeMap<String, Vec<TimePoint>> = BTreeMap::new();
        for row in csv_reader.deserialize() {
            let record: EmissionRecord = row?;
            grouped
                .entry(record.entity)
                .or_default()
                .push(TimePoint::new(record.year, record.value));
        }

        if grouped.is_empty() {
            return Err(ForecastError::DataError(
                "No emission records found in data".to_string(),
            ));
        }

        let mut dataset = ReferenceDataset::new();
        for (entity, mut points) in grouped {
            points.sort_by_key(|p| p.year);
            dataset.insert(HistoricalSeries::new(entity, points)?);
        }

        Ok(dataset)
    }

    /// The dataset compiled into the crate
    pub fn builtin() -> Result<ReferenceDataset> {
        Self::from_reader(BUILTIN_CSV.as_bytes())
    }
}
