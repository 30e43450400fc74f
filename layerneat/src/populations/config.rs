use super::ConfigError;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Settings of the generation loop.
///
/// # Note
/// All quantities expressing probabilities or
/// fractions should be in the range [0.0, 1.0].
/// [`PopulationConfig::apply`] enforces this for
/// values read from a flat key-value source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Size of the population.
    pub size: NonZeroUsize,
    /// Number of generations run by [`Population::evolve`].
    ///
    /// [`Population::evolve`]: crate::Population::evolve
    pub num_generations: NonZeroUsize,
    /// Largest genetic distance at which a genome
    /// still joins a species.
    pub distance_threshold: f32,
    /// Whether genomes are grouped into species. If
    /// `false`, parents are drawn from the top
    /// [`survival_threshold`] of the whole population.
    ///
    /// [`survival_threshold`]: PopulationConfig::survival_threshold
    pub use_speciation: bool,
    /// Top fraction of the population which can participate
    /// in mating when speciation is disabled.
    pub survival_threshold: f32,
    /// Seed of the population's random generator.
    pub seed: u64,
}

impl PopulationConfig {
    /// Returns a "zero-valued" configuration.
    /// All values are 0, `false`, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// Evolution barely progresses with these values. Use it
    /// as a base for struct update syntax.
    ///
    /// # Examples
    /// ```
    /// use layerneat::PopulationConfig;
    ///
    /// let cfg = PopulationConfig {
    ///     // Specify some values here...
    ///     distance_threshold: 3.0,
    ///     // Default the rest...
    ///     ..PopulationConfig::zero()
    /// };
    /// assert_eq!(cfg.size.get(), 1);
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::MIN,
            num_generations: NonZeroUsize::MIN,
            distance_threshold: 0.0,
            use_speciation: false,
            survival_threshold: 0.0,
            seed: 0,
        }
    }

    /// Sets the field named by `key` from a flat numeric value.
    ///
    /// Returns `Ok(false)` if the key does not belong to the
    /// population configuration, so that callers can offer it
    /// to other configuration sections.
    ///
    /// # Errors
    /// Returns an error if the value is invalid for the key.
    ///
    /// # Examples
    /// ```
    /// use layerneat::PopulationConfig;
    ///
    /// let mut config = PopulationConfig::default();
    /// assert!(config.apply("population_size", 120.0).unwrap());
    /// assert_eq!(config.size.get(), 120);
    ///
    /// assert!(!config.apply("input_nodes", 3.0).unwrap());
    /// assert!(config.apply("population_size", 0.0).is_err());
    /// ```
    pub fn apply(&mut self, key: &str, value: f64) -> Result<bool, ConfigError> {
        match key {
            "population_size" => self.size = parse_count("population_size", value)?,
            "num_generations" => self.num_generations = parse_count("num_generations", value)?,
            "compatibility_threshold" => {
                self.distance_threshold = parse_real("compatibility_threshold", value)? as f32
            }
            "use_speciation" => self.use_speciation = parse_real("use_speciation", value)? != 0.0,
            "population_cut" => {
                self.survival_threshold = parse_probability("population_cut", value)?
            }
            "seed" => self.seed = parse_seed(value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Default for PopulationConfig {
    fn default() -> PopulationConfig {
        PopulationConfig {
            size: nonzero(50),
            num_generations: nonzero(3000),
            distance_threshold: 1.5,
            use_speciation: true,
            survival_threshold: 0.8,
            seed: 0,
        }
    }
}

const fn nonzero(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("count must be nonzero"),
    }
}

/// Parses a whole, positive count.
///
/// # Errors
/// Returns an error if `value` is non-finite, below 1,
/// or has a fractional part.
pub fn parse_count(key: &'static str, value: f64) -> Result<NonZeroUsize, ConfigError> {
    let value = parse_real(key, value)?;
    if value.fract() != 0.0 {
        return Err(ConfigError::NonPositiveCount { key, value });
    }
    NonZeroUsize::new(value.max(0.0) as usize).ok_or(ConfigError::NonPositiveCount { key, value })
}

/// Parses a probability in `[0, 1]`.
///
/// # Errors
/// Returns an error if `value` is non-finite or out of range.
pub fn parse_probability(key: &'static str, value: f64) -> Result<f32, ConfigError> {
    let value = parse_real(key, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value as f32)
    } else {
        Err(ConfigError::ProbabilityOutOfRange { key, value })
    }
}

/// Parses any finite number.
///
/// # Errors
/// Returns an error if `value` is NaN or infinite.
pub fn parse_real(key: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { key, value })
    }
}

fn parse_seed(value: f64) -> Result<u64, ConfigError> {
    let value = parse_real("seed", value)?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(ConfigError::InvalidSeed(value));
    }
    Ok(value as u64)
}
