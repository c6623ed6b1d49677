//! # Emission Outlook
//!
//! Umbrella crate for the emission outlook workspace. It re-exports the
//! forecasting engine and its numeric kernels, and offers a shortcut for the
//! common case of forecasting from the built-in reference data.
//!
//! ## Example
//!
//! ```
//! use emission_outlook_workspace::{builtin_forecaster, ForecastRequest, ImpactTier};
//!
//! let forecaster = builtin_forecaster().unwrap();
//! let result = forecaster.forecast(&ForecastRequest::global(2050)).unwrap();
//! assert_eq!(result.entity_id, "global");
//! assert_ne!(result.narrative.tier, ImpactTier::Decline);
//! ```

pub use emission_forecast::*;
pub use outlook_math;

/// A forecaster over the built-in dataset with the default configuration.
///
/// # Examples
///
/// ```
/// use emission_outlook_workspace::{builtin_forecaster, SeriesSource};
///
/// let forecaster = builtin_forecaster().unwrap();
/// assert!(forecaster.source().entities().contains(&"India"));
/// ```
pub fn builtin_forecaster() -> Result<Forecaster<ReferenceDataset>> {
    Forecaster::new(DataLoader::builtin()?, ForecastConfig::default())
}
