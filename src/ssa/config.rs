//! SSA configuration.
//!
//! [`SsaConfig`] holds every parameter that controls the search loop.

use super::types::ObjectiveDirection;
use crate::error::SsaError;

/// Configuration for the Social Spider Algorithm.
///
/// # Defaults
///
/// ```
/// use u_ssa::ssa::SsaConfig;
///
/// let config = SsaConfig::default();
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.max_iterations, 10_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_ssa::ssa::{ObjectiveDirection, SsaConfig};
///
/// let config = SsaConfig::default()
///     .with_population_size(50)
///     .with_max_iterations(2_000)
///     .with_p_change(0.8)
///     .with_direction(ObjectiveDirection::Minimize)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SsaConfig {
    /// Number of spiders. Fixed for the run.
    pub population_size: usize,

    /// Number of iterations to perform.
    pub max_iterations: usize,

    /// Scales the attenuation base (mean per-dimension standard deviation)
    /// into the attenuation factor. Larger values let vibrations travel
    /// farther. Must be positive.
    pub attenuation_rate: f64,

    /// Base of the mask-change probability `1 - p_change^inactive_deg`.
    /// Must lie in `(0, 1]`; `1.0` freezes the mask.
    pub p_change: f64,

    /// Upper bound of the per-dimension probability that a re-rolled mask
    /// bit follows a random spider. Must lie in `[0, 1]`.
    pub p_mask: f64,

    /// Whether lower or higher fitness is better.
    pub direction: ObjectiveDirection,

    /// The constant `C` in `ln(1 / (cost - C) + 1)`.
    ///
    /// The default suits non-negative costs such as sums of squares. Once
    /// the best cost reaches it, the engine scores intensities against a
    /// floor just below the best cost instead.
    pub intensity_floor: f64,

    /// Whether to evaluate fitness in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Seeded runs give the
    /// same result either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SsaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            max_iterations: 10_000,
            attenuation_rate: 1.0,
            p_change: 0.7,
            p_mask: 0.1,
            direction: ObjectiveDirection::Minimize,
            intensity_floor: -1e-100,
            parallel: false,
            seed: None,
        }
    }
}

impl SsaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_attenuation_rate(mut self, rate: f64) -> Self {
        self.attenuation_rate = rate;
        self
    }

    pub fn with_p_change(mut self, p: f64) -> Self {
        self.p_change = p;
        self
    }

    pub fn with_p_mask(mut self, p: f64) -> Self {
        self.p_mask = p;
        self
    }

    /// Sets the optimization direction.
    pub fn with_direction(mut self, direction: ObjectiveDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the intensity floor `C`.
    pub fn with_intensity_floor(mut self, floor: f64) -> Self {
        self.intensity_floor = floor;
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick runs: 20 spiders, 1 000 iterations.
    pub fn fast() -> Self {
        Self {
            population_size: 20,
            max_iterations: 1_000,
            ..Self::default()
        }
    }

    /// Preset matching the reference settings: 30 spiders, 10 000 iterations.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for harder landscapes: 50 spiders, 50 000 iterations.
    pub fn quality() -> Self {
        Self {
            population_size: 50,
            max_iterations: 50_000,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), SsaError> {
        if self.population_size == 0 {
            return Err(SsaError::InvalidPopulationSize);
        }
        if self.max_iterations == 0 {
            return Err(SsaError::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !(self.attenuation_rate > 0.0 && self.attenuation_rate.is_finite()) {
            return Err(SsaError::InvalidConfig(format!(
                "attenuation_rate must be positive, got {}",
                self.attenuation_rate
            )));
        }
        if !(self.p_change > 0.0 && self.p_change <= 1.0) {
            return Err(SsaError::InvalidConfig(format!(
                "p_change must be in (0, 1], got {}",
                self.p_change
            )));
        }
        if !(0.0..=1.0).contains(&self.p_mask) {
            return Err(SsaError::InvalidConfig(format!(
                "p_mask must be in [0, 1], got {}",
                self.p_mask
            )));
        }
        if !self.intensity_floor.is_finite() {
            return Err(SsaError::InvalidConfig(
                "intensity_floor must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SsaConfig::default();
        assert_eq!(config.population_size, 30);
        assert_eq!(config.max_iterations, 10_000);
        assert!((config.attenuation_rate - 1.0).abs() < 1e-10);
        assert!((config.p_change - 0.7).abs() < 1e-10);
        assert!((config.p_mask - 0.1).abs() < 1e-10);
        assert_eq!(config.direction, ObjectiveDirection::Minimize);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SsaConfig::default()
            .with_population_size(5)
            .with_max_iterations(100)
            .with_attenuation_rate(2.0)
            .with_p_change(0.5)
            .with_p_mask(0.3)
            .with_direction(ObjectiveDirection::Maximize)
            .with_intensity_floor(-10.0)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 5);
        assert_eq!(config.max_iterations, 100);
        assert!((config.attenuation_rate - 2.0).abs() < 1e-10);
        assert!((config.p_change - 0.5).abs() < 1e-10);
        assert!((config.p_mask - 0.3).abs() < 1e-10);
        assert_eq!(config.direction, ObjectiveDirection::Maximize);
        assert!((config.intensity_floor + 10.0).abs() < 1e-10);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(SsaConfig::default().validate().is_ok());
        assert!(SsaConfig::default().with_population_size(1).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_population() {
        let config = SsaConfig::default().with_population_size(0);
        assert_eq!(config.validate(), Err(SsaError::InvalidPopulationSize));
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = SsaConfig::default().with_max_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_attenuation_rate() {
        assert!(SsaConfig::default().with_attenuation_rate(0.0).validate().is_err());
        assert!(SsaConfig::default().with_attenuation_rate(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_p_change_range() {
        assert!(SsaConfig::default().with_p_change(0.0).validate().is_err());
        assert!(SsaConfig::default().with_p_change(1.01).validate().is_err());
        assert!(SsaConfig::default().with_p_change(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_p_mask_range() {
        assert!(SsaConfig::default().with_p_mask(-0.1).validate().is_err());
        assert!(SsaConfig::default().with_p_mask(1.5).validate().is_err());
        assert!(SsaConfig::default().with_p_mask(0.0).validate().is_ok());
        assert!(SsaConfig::default().with_p_mask(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_floor() {
        let config = SsaConfig::default().with_intensity_floor(f64::NEG_INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets_valid() {
        for config in [SsaConfig::fast(), SsaConfig::balanced(), SsaConfig::quality()] {
            assert!(config.validate().is_ok());
        }
        assert_eq!(SsaConfig::fast().population_size, 20);
        assert_eq!(SsaConfig::quality().max_iterations, 50_000);
    }

    #[test]
    fn test_preset_chainable() {
        let config = SsaConfig::fast().with_population_size(8).with_seed(1);
        assert_eq!(config.population_size, 8);
        assert_eq!(config.max_iterations, 1_000);
        assert_eq!(config.seed, Some(1));
    }
}
