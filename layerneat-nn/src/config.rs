//! Flat key/value configuration.
//!
//! Experiments are often described by a plain list of named
//! numeric settings. [`from_entries`] distributes such a list
//! over a [`GeneticConfig`] and a [`PopulationConfig`],
//! starting from their defaults.

use crate::genomics::GeneticConfig;

use layerneat::{ConfigError, PopulationConfig};
use log::debug;

/// Builds both configurations from `(key, value)` entries.
///
/// Keys not present keep their default value. Later
/// entries override earlier ones.
///
/// Recognized keys are `input_nodes`, `output_nodes`,
/// `new_connection_rate`, `new_node_rate`, `new_node_layer_rate`,
/// `disable_connection_rate`, `weight_perturbation_rate`,
/// `weight_replace_rate`, `perturbation_step`,
/// `compatibility_disjoint_coefficient`,
/// `compatibility_weight_coefficient`, `population_size`,
/// `num_generations`, `compatibility_threshold`, `population_cut`,
/// `use_speciation` and `seed`.
///
/// # Errors
/// Returns an error on the first unrecognized key
/// or invalid value.
///
/// # Examples
/// ```
/// use layerneat::ConfigError;
/// use layerneat_nn::config::from_entries;
///
/// let (genetic, population) = from_entries([
///     ("input_nodes", 2.0),
///     ("population_size", 150.0),
///     ("use_speciation", 0.0),
/// ])
/// .unwrap();
/// assert_eq!(genetic.input_count.get(), 2);
/// assert_eq!(genetic.output_count.get(), 4);
/// assert_eq!(population.size.get(), 150);
/// assert!(!population.use_speciation);
///
/// assert!(matches!(
///     from_entries([("hidden_nodes", 3.0)]),
///     Err(ConfigError::UnknownKey(key)) if key == "hidden_nodes"
/// ));
/// ```
pub fn from_entries<I, K>(entries: I) -> Result<(GeneticConfig, PopulationConfig), ConfigError>
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let mut genetic = GeneticConfig::default();
    let mut population = PopulationConfig::default();
    for (key, value) in entries {
        let key = key.as_ref();
        if !genetic.apply(key, value)? && !population.apply(key, value)? {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }
        debug!("configuration: {} = {}", key, value);
    }
    Ok((genetic, population))
}
