use crate::genomics::ActivationType;

use layerneat::{parse_count, parse_probability, parse_real, ConfigError};
use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Shape, mutation rates and distance coefficients
/// shared by every genome of a run.
///
/// # Note
/// Rates are probabilities in [0.0, 1.0]. Values
/// read through [`GeneticConfig::apply`] are
/// checked; values set directly are not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of inputs in a genome.
    pub input_count: NonZeroUsize,
    /// Number of outputs in a genome.
    pub output_count: NonZeroUsize,
    /// Activation function of hidden nodes.
    pub hidden_activation: ActivationType,
    /// Activation function of output nodes.
    pub output_activation: ActivationType,
    /// Chance of a connection addition mutation.
    pub new_connection_rate: f32,
    /// Chance of a node addition mutation.
    pub new_node_rate: f32,
    /// Chance that an added node goes into a new,
    /// deepest hidden layer instead of an existing one.
    pub new_node_layer_rate: f32,
    /// Chance of disabling a random enabled connection.
    /// Off by default.
    pub disable_connection_rate: f32,
    /// Chance, per connection, of adding
    /// [`perturbation_step`] to its weight.
    ///
    /// [`perturbation_step`]: GeneticConfig::perturbation_step
    pub weight_perturbation_rate: f32,
    /// Chance, per connection, of replacing its weight
    /// with a uniformly random value in `[-1, 1]`.
    pub weight_replace_rate: f32,
    /// Amount added to a weight on perturbation.
    pub perturbation_step: f32,
    /// Weight of non-matching (disjoint and excess)
    /// genes in genetic distance.
    pub disjoint_coefficient: f32,
    /// Weight of the matching gene weight
    /// difference average in genetic distance.
    pub weight_coefficient: f32,
}

impl GeneticConfig {
    /// Returns a "zero-valued" configuration.
    /// All values are 0, or in the case of
    /// `NonZeroUsize`s, 1. Activations are sigmoid.
    ///
    /// # Note
    /// Evolution barely progresses with these values. Use it
    /// as a base for struct update syntax.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::GeneticConfig;
    ///
    /// let config = GeneticConfig {
    ///     // Specify some values here...
    ///     new_node_rate: 1.0,
    ///     // Default the rest...
    ///     ..GeneticConfig::zero()
    /// };
    /// assert_eq!(config.new_connection_rate, 0.0);
    /// ```
    pub const fn zero() -> GeneticConfig {
        GeneticConfig {
            input_count: NonZeroUsize::MIN,
            output_count: NonZeroUsize::MIN,
            hidden_activation: ActivationType::Sigmoid,
            output_activation: ActivationType::Sigmoid,
            new_connection_rate: 0.0,
            new_node_rate: 0.0,
            new_node_layer_rate: 0.0,
            disable_connection_rate: 0.0,
            weight_perturbation_rate: 0.0,
            weight_replace_rate: 0.0,
            perturbation_step: 0.0,
            disjoint_coefficient: 0.0,
            weight_coefficient: 0.0,
        }
    }

    /// Sets the field named by `key` from a flat numeric value.
    ///
    /// Returns `Ok(false)` if the key does not belong to the
    /// genetic configuration.
    ///
    /// # Errors
    /// Returns an error if the value is invalid for the key.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::GeneticConfig;
    ///
    /// let mut config = GeneticConfig::default();
    /// assert!(config.apply("input_nodes", 2.0).unwrap());
    /// assert_eq!(config.input_count.get(), 2);
    ///
    /// assert!(config.apply("new_node_rate", 1.2).is_err());
    /// assert!(!config.apply("population_size", 10.0).unwrap());
    /// ```
    pub fn apply(&mut self, key: &str, value: f64) -> Result<bool, ConfigError> {
        match key {
            "input_nodes" => self.input_count = parse_count("input_nodes", value)?,
            "output_nodes" => self.output_count = parse_count("output_nodes", value)?,
            "new_connection_rate" => {
                self.new_connection_rate = parse_probability("new_connection_rate", value)?
            }
            "new_node_rate" => self.new_node_rate = parse_probability("new_node_rate", value)?,
            "new_node_layer_rate" => {
                self.new_node_layer_rate = parse_probability("new_node_layer_rate", value)?
            }
            "disable_connection_rate" => {
                self.disable_connection_rate = parse_probability("disable_connection_rate", value)?
            }
            "weight_perturbation_rate" => {
                self.weight_perturbation_rate =
                    parse_probability("weight_perturbation_rate", value)?
            }
            "weight_replace_rate" => {
                self.weight_replace_rate = parse_probability("weight_replace_rate", value)?
            }
            "perturbation_step" => {
                self.perturbation_step = parse_real("perturbation_step", value)? as f32
            }
            "compatibility_disjoint_coefficient" => {
                self.disjoint_coefficient =
                    parse_real("compatibility_disjoint_coefficient", value)? as f32
            }
            "compatibility_weight_coefficient" => {
                self.weight_coefficient =
                    parse_real("compatibility_weight_coefficient", value)? as f32
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Default for GeneticConfig {
    fn default() -> GeneticConfig {
        GeneticConfig {
            input_count: nonzero(5),
            output_count: nonzero(4),
            new_connection_rate: 0.05,
            new_node_rate: 0.02,
            new_node_layer_rate: 0.002,
            disable_connection_rate: 0.0,
            weight_perturbation_rate: 0.8,
            weight_replace_rate: 0.2,
            perturbation_step: 0.1,
            disjoint_coefficient: 1.0,
            weight_coefficient: 0.4,
            ..GeneticConfig::zero()
        }
    }
}

const fn nonzero(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("count must be nonzero"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_every_key() {
        let mut config = GeneticConfig::zero();
        for (key, value) in [
            ("input_nodes", 3.0),
            ("output_nodes", 2.0),
            ("new_connection_rate", 0.5),
            ("new_node_rate", 0.25),
            ("new_node_layer_rate", 0.125),
            ("disable_connection_rate", 0.75),
            ("weight_perturbation_rate", 1.0),
            ("weight_replace_rate", 0.0),
            ("perturbation_step", -0.5),
            ("compatibility_disjoint_coefficient", 2.0),
            ("compatibility_weight_coefficient", 0.5),
        ] {
            assert!(config.apply(key, value).unwrap(), "{} was not recognized", key);
        }
        assert_eq!(
            config,
            GeneticConfig {
                input_count: NonZeroUsize::new(3).unwrap(),
                output_count: NonZeroUsize::new(2).unwrap(),
                new_connection_rate: 0.5,
                new_node_rate: 0.25,
                new_node_layer_rate: 0.125,
                disable_connection_rate: 0.75,
                weight_perturbation_rate: 1.0,
                weight_replace_rate: 0.0,
                perturbation_step: -0.5,
                disjoint_coefficient: 2.0,
                weight_coefficient: 0.5,
                ..GeneticConfig::zero()
            }
        );
    }

    #[test]
    fn apply_rejects_bad_values() {
        let mut config = GeneticConfig::default();
        assert!(matches!(
            config.apply("output_nodes", 0.0),
            Err(ConfigError::NonPositiveCount { key: "output_nodes", .. })
        ));
        assert!(matches!(
            config.apply("weight_replace_rate", -0.2),
            Err(ConfigError::ProbabilityOutOfRange { .. })
        ));
        assert!(matches!(
            config.apply("perturbation_step", f64::INFINITY),
            Err(ConfigError::NonFinite { .. })
        ));
        assert_eq!(config, GeneticConfig::default());
    }
}
