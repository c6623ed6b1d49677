//! Forecasting configuration
//!
//! Horizon bounds, the fallback entity and the set of enabled methods are
//! preconditions the engine honors, not constants baked into it. They load from
//! TOML or JSON; every field has a default matching the product behavior.
//!
//! ```toml
//! global_entity = "global"
//! fallback_entity = "India"
//! methods = ["damped_growth", "level_trend", "local_slope"]
//!
//! [global_horizon]
//! min_target_year = 2020
//! max_target_year = 2125
//!
//! [entity_horizon]
//! min_target_year = 2020
//! max_target_year = 2150
//! ```

use crate::error::{ForecastError, Result};
use crate::models::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Accepted target years, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonBounds {
    pub min_target_year: i32,
    pub max_target_year: i32,
}

impl HorizonBounds {
    pub fn new(min_target_year: i32, max_target_year: i32) -> Self {
        Self {
            min_target_year,
            max_target_year,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min_target_year..=self.max_target_year).contains(&year)
    }
}

/// Whether a request targets the global series or a single entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Global,
    Entity,
}

/// Top-level forecasting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Entity used when a request names none
    pub global_entity: String,
    /// Entity used when a requested one is unknown; `None` disables fallback
    pub fallback_entity: Option<String>,
    /// Bounds for global requests
    pub global_horizon: HorizonBounds,
    /// Bounds for entity requests
    pub entity_horizon: HorizonBounds,
    /// Methods blended into the ensemble, in order
    pub methods: Vec<Method>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            global_entity: "global".to_string(),
            fallback_entity: Some("India".to_string()),
            global_horizon: HorizonBounds::new(2020, 2125),
            entity_horizon: HorizonBounds::new(2020, 2150),
            methods: Method::ALL.to_vec(),
        }
    }
}

impl ForecastConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| ForecastError::ConfigError(e.to_string()))
    }

    /// Bounds that apply to `scope`
    pub fn horizon(&self, scope: Scope) -> HorizonBounds {
        match scope {
            Scope::Global => self.global_horizon,
            Scope::Entity => self.entity_horizon,
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.global_entity.trim().is_empty() {
            errors.push("global_entity must not be empty".into());
        }

        if let Some(fallback) = &self.fallback_entity {
            if fallback.trim().is_empty() {
                errors.push("fallback_entity must not be empty when set".into());
            }
        }

        for (name, bounds) in [
            ("global_horizon", self.global_horizon),
            ("entity_horizon", self.entity_horizon),
        ] {
            if bounds.min_target_year > bounds.max_target_year {
                errors.push(format!(
                    "{}.min_target_year ({}) must not exceed max_target_year ({})",
                    name, bounds.min_target_year, bounds.max_target_year
                ));
            }
        }

        if self.methods.is_empty() {
            errors.push("methods must name at least one method".into());
        }

        let distinct: BTreeSet<_> = self.methods.iter().collect();
        if distinct.len() != self.methods.len() {
            errors.push("methods must not repeat a method".into());
        }

        errors
    }
}
