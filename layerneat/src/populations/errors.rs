use thiserror::Error;

/// Boxed error type accepted from fitness evaluators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error type indicating an invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The key is not part of the configuration surface.
    #[error("unrecognized configuration key `{0}`")]
    UnknownKey(String),
    /// A count (population size, node count, ...) was below 1.
    #[error("`{key}` must be a whole number of at least 1, got {value}")]
    NonPositiveCount { key: &'static str, value: f64 },
    /// A probability was outside of `[0, 1]`.
    #[error("`{key}` must be a probability in [0, 1], got {value}")]
    ProbabilityOutOfRange { key: &'static str, value: f64 },
    /// The value was NaN or infinite.
    #[error("`{key}` must be a finite number, got {value}")]
    NonFinite { key: &'static str, value: f64 },
    /// The seed was negative or fractional.
    #[error("`seed` must be a non-negative whole number, got {0}")]
    InvalidSeed(f64),
}

/// An error type indicating a failure while
/// evolving a population.
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// The fitness evaluator failed on a genome.
    #[error("fitness evaluation failed for genome {index}")]
    Fitness {
        index: usize,
        #[source]
        source: BoxError,
    },
    /// The fitness evaluator returned NaN or an infinity.
    #[error("fitness evaluation returned non-finite value {value} for genome {index}")]
    NonFiniteFitness { index: usize, value: f32 },
    /// There are no genomes to select from.
    #[error("attempted evolution on empty population")]
    EmptyPopulation,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
